//! CLI entry point for ringctl.

use clap::Parser;
use ringctl::CliConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = CliConfig::parse();
    config.run()
}
