use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Who answers on your networks? Probe CIDR ranges, print a presence table.")]
pub struct CommandLine {
    /// Single or comma-separated list of CIDR networks (e.g. "10.0.0.0/24,192.168.1.0/24")
    pub networks: String,

    /// Comma-separated labels for the networks, matched by position
    #[arg(long, value_name = "NAMES")]
    pub labels: Option<String>,

    /// Resolve live addresses to hostnames via reverse DNS
    #[arg(long)]
    pub resolve: bool,

    /// Static hosts file: one "address name" pair per line, '#' starts a comment
    #[arg(long, value_name = "FILE")]
    pub hosts: Option<PathBuf>,

    /// Maximum number of probes in flight at once
    #[arg(short, long, default_value_t = 100)]
    pub concurrency: usize,

    /// Per-probe timeout in milliseconds
    #[arg(short, long, default_value_t = 1000, value_name = "MILLIS")]
    pub timeout_ms: u64,

    /// Table column width
    #[arg(long, default_value_t = 25)]
    pub col_width: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Labels by network position; missing or blank entries become `None`.
    pub fn labels_by_position(&self) -> Vec<Option<String>> {
        match &self.labels {
            Some(raw) => raw
                .split(',')
                .map(|l| Some(l.trim().to_string()).filter(|l| !l.is_empty()))
                .collect(),
            None => Vec::new(),
        }
    }
}
