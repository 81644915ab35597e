use std::sync::Arc;
use std::time::Duration;

use colored::*;
use lanscan_common::config::{ProbeKind, ScanConfig};
use lanscan_common::scanning::{NameResolver, ReachabilityProbe};
use lanscan_common::success;
use lanscan_core::export;
use lanscan_core::network::{PingProbe, TcpProbe};
use lanscan_core::scanner::{NoopResolver, ReverseDnsResolver, ScanCoordinator, ScanReport};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info_span, warn};

use crate::terminal::{colors, format, print, progress};

pub async fn sweep(cfg: &ScanConfig) -> anyhow::Result<()> {
    sweep_starts(cfg);

    // Only spans carrying `indicatif.pb_show` get a progress bar
    let span = if cfg.no_progress {
        info_span!("sweep")
    } else {
        let span = info_span!("sweep", indicatif.pb_show = true);
        progress::attach_bar(&span, cfg.network.hosts().remaining());
        span
    };

    let scanner = ScanCoordinator::new(build_probe(cfg), build_resolver(cfg))
        .with_timeout(cfg.timeout)
        .with_concurrency(cfg.workers)
        .with_events(progress::event_hook(span.clone(), !cfg.no_progress));

    let shutdown = CancellationToken::new();
    let interrupt = shutdown.clone();
    let interrupt_listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let result = scanner
        .run_until(&cfg.network, shutdown.child_token())
        .instrument(span.clone())
        .await;
    interrupt_listener.abort();
    drop(span);

    let report: ScanReport = result?;
    if report.interrupted {
        warn!("Scan interrupted by user");
    }

    sweep_ends(&report, cfg);

    if let Some(path) = &cfg.output {
        match export::save_report(&report, path) {
            Ok(()) => success!("Results saved to {}", path.display()),
            Err(e) => error!("{e}"),
        }
    }

    Ok(())
}

fn build_probe(cfg: &ScanConfig) -> Arc<dyn ReachabilityProbe> {
    match cfg.probe {
        ProbeKind::Ping => Arc::new(PingProbe),
        ProbeKind::Tcp { port } => Arc::new(TcpProbe::new(port)),
    }
}

fn build_resolver(cfg: &ScanConfig) -> Arc<dyn NameResolver> {
    if cfg.no_dns {
        Arc::new(NoopResolver)
    } else {
        Arc::new(ReverseDnsResolver::new())
    }
}

fn sweep_starts(cfg: &ScanConfig) {
    print::header("starting sweep", cfg.quiet);
    let probe: String = match cfg.probe {
        ProbeKind::Ping => "icmp echo (ping)".to_string(),
        ProbeKind::Tcp { port } => format!("tcp handshake on port {port}"),
    };
    print::aligned_line("Network", cfg.network.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Hosts", cfg.network.hosts().remaining());
    print::aligned_line("Probe", probe);
    print::aligned_line("Timeout", format!("{}s", cfg.timeout.as_secs()));
    print::aligned_line("Workers", cfg.workers);
    print::separator();
}

fn sweep_ends(report: &ScanReport, cfg: &ScanConfig) {
    if report.records.is_empty() {
        print::header("zero hosts detected", cfg.quiet);
        print::no_results();
    } else {
        print::header("scan results", cfg.quiet);
        print::print(&format!("{}", export::table_header().bold()));
        print::separator();
        for record in &report.records {
            print::print(&format::table_row(record));
        }
    }

    print_summary(report.alive_count(), report.elapsed);
}

fn print_summary(alive: usize, elapsed: Duration) {
    let active_hosts: ColoredString = format!("{alive} active hosts").bold().green();
    let total_time: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    let output: String = format!("Scan complete: {active_hosts} found in {total_time}");

    print::fat_separator();
    print::centerln(&output);
}
