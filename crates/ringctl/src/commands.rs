//! Subcommand implementations.

use std::collections::BTreeMap;

use clap::Subcommand;
use ringcore::HashRing;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the owner of a key and its next-in-ring failover candidates.
    Locate {
        /// Key to place on the ring.
        key: String,
        /// How many distinct candidate nodes to list (owner first).
        #[arg(long, default_value_t = 1)]
        candidates: usize,
    },
    /// List a node's virtual positions.
    Positions {
        /// Node identifier (need not be a current member).
        node: String,
    },
    /// Sample keys and report the fraction owned by each node.
    Distribution {
        /// Number of sampled keys.
        #[arg(long, default_value_t = 10_000)]
        samples: usize,
    },
}

#[derive(Serialize)]
struct LocateReport {
    key: String,
    owner: Option<String>,
    position_index: Option<usize>,
    candidates: Vec<String>,
}

#[derive(Serialize)]
struct PositionsReport {
    node: String,
    on_ring: bool,
    positions: Vec<String>,
}

#[derive(Serialize)]
struct DistributionReport {
    samples: usize,
    fractions: BTreeMap<String, f64>,
}

impl Command {
    pub fn execute(&self, ring: &HashRing, json: bool) -> anyhow::Result<()> {
        match self {
            Command::Locate { key, candidates } => {
                let located = ring.locate_with_position(key.as_bytes());
                let report = LocateReport {
                    key: key.clone(),
                    owner: located.map(|(node, _)| node.to_string()),
                    position_index: located.map(|(_, index)| index),
                    candidates: ring
                        .unique_candidates(key.as_bytes(), *candidates)
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    match &report.owner {
                        Some(owner) => {
                            println!(
                                "{} -> {} (position index {})",
                                report.key,
                                owner,
                                report.position_index.unwrap_or(0)
                            );
                            for (rank, candidate) in report.candidates.iter().enumerate() {
                                println!("  candidate {rank}: {candidate}");
                            }
                        }
                        None => println!("{} -> no node (empty ring)", report.key),
                    }
                }
            }
            Command::Positions { node } => {
                let report = PositionsReport {
                    node: node.clone(),
                    on_ring: ring.contains_node(node.as_str()),
                    positions: ring
                        .node_positions(node)
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    let state = if report.on_ring { "member" } else { "not on ring" };
                    println!("{} ({state})", report.node);
                    for position in &report.positions {
                        println!("  {position}");
                    }
                }
            }
            Command::Distribution { samples } => {
                let mut counts: BTreeMap<String, usize> = BTreeMap::new();
                for i in 0..*samples {
                    if let Some(owner) = ring.locate(format!("sample-{i}").as_bytes()) {
                        *counts.entry(owner.to_string()).or_default() += 1;
                    }
                }
                let report = DistributionReport {
                    samples: *samples,
                    fractions: counts
                        .into_iter()
                        .map(|(node, count)| (node, count as f64 / *samples as f64))
                        .collect(),
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("distribution over {} sampled keys:", report.samples);
                    for (node, fraction) in &report.fractions {
                        println!("  {node}: {:.2}%", fraction * 100.0);
                    }
                }
            }
        }
        Ok(())
    }
}
