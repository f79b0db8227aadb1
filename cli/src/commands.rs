use std::path::PathBuf;

use clap::Parser;
use sweepr_common::network::target::{HostSpec, PortSpec};

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "A bounded-concurrency TCP connect sweeper.")]
pub struct CommandLine {
    /// Host or CIDR block to sweep, e.g. 192.168.1.0/24
    pub target: HostSpec,

    /// Port or inclusive port range, e.g. 22 or 1-1000
    #[arg(short, long)]
    pub ports: PortSpec,

    /// Append open endpoints to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seconds before an unanswered attempt is evicted
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,

    /// Number of parallel connection attempts
    #[arg(short, long, default_value_t = 256)]
    pub slots: usize,

    /// Milliseconds to sleep between polling passes
    #[arg(short = 'm', long, default_value_t = 500)]
    pub poll_interval: u64,

    /// Print the sweep plan and every hit even when logging to a file
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
