//! Command-line configuration.

use clap::Parser;
use ringcore::RingBuilder;

use crate::commands::Command;

/// Inspect a consistent hash ring built from a node list.
///
/// The ring is rebuilt from `--nodes` on every invocation; placement is
/// deterministic, so repeated runs against the same membership agree.
#[derive(Debug, Parser)]
#[command(name = "ringctl", version, about)]
pub struct CliConfig {
    /// Comma-separated node identifiers, added in the given order.
    #[arg(long, value_delimiter = ',', required = true)]
    pub nodes: Vec<String>,

    /// Virtual positions per node.
    #[arg(long, default_value_t = ringcore::DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        let ring = RingBuilder::new()
            .replicas(self.replicas)
            .nodes(self.nodes.iter().cloned())
            .build();
        self.command.execute(&ring, self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_node_list_and_defaults() {
        let config =
            CliConfig::try_parse_from(["ringctl", "--nodes", "a,b,c", "locate", "some-key"])
                .unwrap();
        assert_eq!(config.nodes, ["a", "b", "c"]);
        assert_eq!(config.replicas, ringcore::DEFAULT_REPLICAS);
        assert!(!config.json);
    }

    #[test]
    fn test_requires_nodes() {
        assert!(CliConfig::try_parse_from(["ringctl", "locate", "k"]).is_err());
    }
}
