pub mod sweep;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use lanscan_common::config::{
    DEFAULT_NETWORK, DEFAULT_OUTPUT_FILE, DEFAULT_TCP_PORT, DEFAULT_WORKERS, ProbeKind,
    QUICK_WORKERS, ScanConfig,
};
use lanscan_common::network::range::NetworkSpec;
use lanscan_core::export;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProbeArg {
    /// System ping utility, one echo request
    Ping,
    /// TCP handshake against --port
    Tcp,
}

#[derive(Parser)]
#[command(name = "lanscan")]
#[command(version, about = "Sweep an IPv4 subnet for live hosts.")]
pub struct CommandLine {
    /// Network to scan in CIDR notation
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: NetworkSpec,

    /// Probe timeout in seconds
    #[arg(short, long, default_value_t = 1)]
    pub timeout: u64,

    /// Maximum number of concurrent probes [default: 50, 100 with --quick]
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Save the results to this file [default: scan_results.txt]
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_OUTPUT_FILE)]
    pub output: Option<PathBuf>,

    /// Quick preset: 100 workers and always save to a timestamped file
    #[arg(long)]
    pub quick: bool,

    /// Do not print periodic progress
    #[arg(long)]
    pub no_progress: bool,

    /// Skip reverse DNS lookups
    #[arg(long)]
    pub no_dns: bool,

    /// How to decide whether a host is alive
    #[arg(long, value_enum, default_value_t = ProbeArg::Ping)]
    pub probe: ProbeArg,

    /// Port used by the TCP probe
    #[arg(short, long, default_value_t = DEFAULT_TCP_PORT)]
    pub port: u16,

    /// Suppress banner and section headers
    #[arg(short, long)]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> ScanConfig {
        let probe = match self.probe {
            ProbeArg::Ping => ProbeKind::Ping,
            ProbeArg::Tcp => ProbeKind::Tcp { port: self.port },
        };

        let workers = self
            .workers
            .unwrap_or(if self.quick { QUICK_WORKERS } else { DEFAULT_WORKERS });
        let output = match self.output {
            Some(path) => Some(path),
            None if self.quick => Some(export::quick_output_path()),
            None => None,
        };

        ScanConfig {
            network: self.network,
            timeout: Duration::from_secs(self.timeout),
            workers,
            probe,
            output,
            no_dns: self.no_dns,
            no_progress: self.no_progress,
            quiet: self.quiet,
        }
    }
}
