//! Load server config: defaults, then config file, then environment.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Server configuration. File: ~/.config/shape/server.toml or /etc/shape/server.toml.
/// Env overrides: SHAPE_LISTEN_ADDR, SHAPE_MAX_CONNECTIONS, SHAPE_IO_TIMEOUT_SECS.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// TCP listen address (default 127.0.0.1:9999).
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    /// Connections served at once; the accept loop waits when all are busy (default 1024).
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Per-operation read/write deadline in seconds. 0 waits forever (default 300).
    #[serde(default = "default_io_timeout_secs")]
    pub io_timeout_secs: u64,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9999))
}
fn default_max_connections() -> usize {
    1024
}
fn default_io_timeout_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_connections: default_max_connections(),
            io_timeout_secs: default_io_timeout_secs(),
        }
    }
}

impl Config {
    pub fn io_timeout(&self) -> Option<Duration> {
        (self.io_timeout_secs > 0).then(|| Duration::from_secs(self.io_timeout_secs))
    }
}

/// Error reading an explicitly requested config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load config: merge default, then config file, then env vars.
/// An explicit `path` must exist and parse; the default locations are best effort.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut c = match path {
        Some(p) => read_file(p)?,
        None => load_default_file().unwrap_or_default(),
    };
    apply_env(&mut c, |key| std::env::var(key).ok());
    Ok(c)
}

/// Apply SHAPE_* overrides. Unparseable values are logged and skipped.
pub fn apply_env(c: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(s) = lookup("SHAPE_LISTEN_ADDR") {
        match s.parse() {
            Ok(a) => c.listen_addr = a,
            Err(_) => warn!("ignoring SHAPE_LISTEN_ADDR={s:?}"),
        }
    }
    if let Some(s) = lookup("SHAPE_MAX_CONNECTIONS") {
        match s.parse() {
            Ok(n) => c.max_connections = n,
            Err(_) => warn!("ignoring SHAPE_MAX_CONNECTIONS={s:?}"),
        }
    }
    if let Some(s) = lookup("SHAPE_IO_TIMEOUT_SECS") {
        match s.parse() {
            Ok(n) => c.io_timeout_secs = n,
            Err(_) => warn!("ignoring SHAPE_IO_TIMEOUT_SECS={s:?}"),
        }
    }
}

fn config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut out = Vec::new();
    if let Some(h) = home {
        out.push(h.join(".config/shape/server.toml"));
    }
    out.push(PathBuf::from("/etc/shape/server.toml"));
    out
}

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_default_file() -> Option<Config> {
    let p = config_paths().into_iter().find(|p| p.exists())?;
    match read_file(&p) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!("{e}; using defaults");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.listen_addr.to_string(), "127.0.0.1:9999");
        assert_eq!(c.io_timeout(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn zero_timeout_disables_deadline() {
        let c = Config {
            io_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(c.io_timeout(), None);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "listen_addr = \"0.0.0.0:7000\"\nmax_connections = 8").unwrap();
        let c = read_file(f.path()).unwrap();
        assert_eq!(c.listen_addr.port(), 7000);
        assert_eq!(c.max_connections, 8);
        assert_eq!(c.io_timeout_secs, 300);
    }

    #[test]
    fn unknown_key_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "port = 7000").unwrap();
        assert!(matches!(
            load(Some(f.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = load(Some(dir.path().join("nope.toml").as_path()));
        assert!(matches!(res, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn env_overrides_and_bad_values() {
        let env: HashMap<&str, &str> = [
            ("SHAPE_LISTEN_ADDR", "127.0.0.1:1234"),
            ("SHAPE_MAX_CONNECTIONS", "lots"),
            ("SHAPE_IO_TIMEOUT_SECS", "5"),
        ]
        .into_iter()
        .collect();
        let mut c = Config::default();
        apply_env(&mut c, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(c.listen_addr.port(), 1234);
        assert_eq!(c.max_connections, 1024);
        assert_eq!(c.io_timeout_secs, 5);
    }
}
