mod args;
mod hosts;
mod terminal;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use colored::*;
use tracing::warn;

use args::CommandLine;
use rollcall_common::config::ScanConfig;
use rollcall_common::network::cidr::Network;
use rollcall_core::probe::ping::PingProber;
use rollcall_core::report::ReportTable;
use rollcall_core::resolver::{Resolver, SystemDns};
use rollcall_core::scanner::Scanner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = CommandLine::parse_args();
    terminal::logging::init();

    let config = ScanConfig::new(
        cmd.concurrency,
        Duration::from_millis(cmd.timeout_ms),
        cmd.resolve,
    )?;

    let networks = parse_networks(&cmd)?;

    let static_hosts = match &cmd.hosts {
        Some(path) => hosts::load(path)?,
        None => HashMap::new(),
    };

    let total: u64 = networks.iter().map(Network::host_count).sum();
    let bar = terminal::progress::scan_bar(total);

    let scanner = Scanner::new(Arc::new(PingProber::new()), config.clone())
        .with_progress(terminal::progress::sink(&bar));

    let cancel = scanner.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, waiting for in-flight probes");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let started = Instant::now();
    let scan = scanner.scan(&networks).await?;
    bar.finish_and_clear();

    let resolver = Arc::new(Resolver::new(static_hosts, Arc::new(SystemDns), &config));
    let bindings = resolver.resolve_all(&scan, config.concurrency_limit).await;

    let table = ReportTable::build(&scan, &bindings);
    print!("{}", table.render(cmd.col_width));

    summary(scan.total_live(), started.elapsed());
    Ok(())
}

/// Parses the comma-separated network list, pairing labels by position.
/// Invalid entries are warned and skipped; zero valid networks is fatal.
fn parse_networks(cmd: &CommandLine) -> anyhow::Result<Vec<Network>> {
    let labels = cmd.labels_by_position();
    let mut networks = Vec::new();

    for (idx, part) in cmd.networks.split(',').enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match Network::parse(part, labels.get(idx).cloned().flatten()) {
            Ok(network) => networks.push(network),
            Err(e) => warn!("skipping network: {e}"),
        }
    }

    anyhow::ensure!(!networks.is_empty(), "no valid networks to scan");
    Ok(networks)
}

fn summary(live: usize, elapsed: Duration) {
    let unit = if live == 1 { "live host" } else { "live hosts" };
    let hosts = format!("{live} {unit}").green().bold();
    let took = format!("{:.2}s", elapsed.as_secs_f64()).yellow().bold();
    eprintln!("{} {hosts} identified in {took}", "scan complete:".bold());
}
