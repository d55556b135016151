//! Load client config: defaults, then ~/.config/shape/client.toml, then environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use shape_core::DEFAULT_ADDR;
use tracing::warn;

/// Client configuration. Env overrides: SHAPE_SERVER_ADDR, SHAPE_IO_TIMEOUT_SECS.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server `host:port` (default 127.0.0.1:9999).
    #[serde(default = "default_server_addr")]
    pub server_addr: String,
    /// Deadline for connect, send and receive, in seconds. 0 waits forever (default 30).
    #[serde(default = "default_io_timeout_secs")]
    pub io_timeout_secs: u64,
}

fn default_server_addr() -> String {
    DEFAULT_ADDR.to_string()
}
fn default_io_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: default_server_addr(),
            io_timeout_secs: default_io_timeout_secs(),
        }
    }
}

impl Config {
    pub fn io_timeout(&self) -> Option<Duration> {
        (self.io_timeout_secs > 0).then(|| Duration::from_secs(self.io_timeout_secs))
    }
}

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

/// Load config. An explicit `path` must exist and parse; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut c = match path {
        Some(p) => read_file(p)?,
        None => match default_path().filter(|p| p.exists()) {
            Some(p) => read_file(&p)?,
            None => Config::default(),
        },
    };
    apply_env(&mut c, |key| std::env::var(key).ok());
    Ok(c)
}

/// Apply SHAPE_* overrides. Unparseable values are logged and skipped.
pub fn apply_env(c: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(s) = lookup("SHAPE_SERVER_ADDR") {
        if s.trim().is_empty() {
            warn!("ignoring empty SHAPE_SERVER_ADDR");
        } else {
            c.server_addr = s;
        }
    }
    if let Some(s) = lookup("SHAPE_IO_TIMEOUT_SECS") {
        match s.parse() {
            Ok(n) => c.io_timeout_secs = n,
            Err(_) => warn!("ignoring SHAPE_IO_TIMEOUT_SECS={s:?}"),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config/shape/client.toml"))
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_server() {
        let c = Config::default();
        assert_eq!(c.server_addr, "127.0.0.1:9999");
        assert_eq!(c.io_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn file_then_env() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "server_addr = \"metrics.local:9000\"").unwrap();
        let mut c = read_file(f.path()).unwrap();
        assert_eq!(c.server_addr, "metrics.local:9000");

        apply_env(&mut c, |k| match k {
            "SHAPE_IO_TIMEOUT_SECS" => Some("0".to_string()),
            "SHAPE_SERVER_ADDR" => Some(" ".to_string()),
            _ => None,
        });
        assert_eq!(c.server_addr, "metrics.local:9000");
        assert_eq!(c.io_timeout(), None);
    }

    #[test]
    fn bad_file_is_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "server_addr = 9000").unwrap();
        assert!(matches!(
            load(Some(f.path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
