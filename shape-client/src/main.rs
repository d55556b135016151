// Shape of Us client: collects a profile, asks the server for metrics, shows the report menu.

use std::path::PathBuf;

use clap::Parser;

use shape_client::{config, logging, menu, report, session};

#[derive(Debug, Parser)]
#[command(name = "shape-client", version, about = "Health metrics client")]
struct Args {
    /// Config file (default: ~/.config/shape/client.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Server address, overrides config and SHAPE_SERVER_ADDR.
    #[arg(long)]
    addr: Option<String>,
    /// Debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut cfg = config::load(args.config.as_deref())?;
    if let Some(addr) = args.addr {
        cfg.server_addr = addr;
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();

    report::welcome(&mut out)?;
    let health = session::run(&cfg, &mut input, &mut out).await?;
    menu::run(&mut input, &mut out, &health)?;
    Ok(())
}
