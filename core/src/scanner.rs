//! # Concurrent Liveness Scanner
//!
//! Fans probes out over every address of every requested network, gated by
//! one shared semaphore so that no more than `concurrency_limit` probes are
//! ever in flight at once (across the whole scan, not per network).
//! Unbounded fan-out on a large subnet is this tool's primary operational
//! risk, so the cap is treated as a correctness requirement.
//!
//! Completion order is nondeterministic and never leaks into the result:
//! each network's live list is re-sorted into ascending numeric address
//! order after the join.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use rollcall_common::config::ScanConfig;
use rollcall_common::network::cidr::Network;

use crate::probe::Prober;

/// Observational callback, invoked once per completed probe with the
/// address and its liveness verdict. Must not assume any ordering.
pub type ProgressSink = Arc<dyn Fn(Ipv4Addr, bool) + Send + Sync>;

/// Live hosts per network, in the order the networks were requested.
/// Each per-network list is in ascending numeric address order.
#[derive(Debug, Clone)]
pub struct ScanResult {
    entries: Vec<(Network, Vec<Ipv4Addr>)>,
}

impl ScanResult {
    fn new(entries: Vec<(Network, Vec<Ipv4Addr>)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(Network, Vec<Ipv4Addr>)] {
        &self.entries
    }

    pub fn network_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_live(&self) -> usize {
        self.entries.iter().map(|(_, live)| live.len()).sum()
    }

    /// Every live address across all networks, in report order.
    pub fn live_addrs(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.entries.iter().flat_map(|(_, live)| live.iter().copied())
    }
}

pub struct Scanner {
    prober: Arc<dyn Prober>,
    config: ScanConfig,
    progress: Option<ProgressSink>,
    cancel: Arc<AtomicBool>,
}

impl Scanner {
    pub fn new(prober: Arc<dyn Prober>, config: ScanConfig) -> Self {
        Self {
            prober,
            config,
            progress: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attaches a per-probe progress callback.
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Handle for stopping the scan from outside (e.g. a Ctrl-C handler).
    ///
    /// Once set, no new probes are dispatched; probes already in flight run
    /// to their own timeout and whatever has been collected is returned.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Probes every address of every network and returns the live hosts,
    /// grouped per network in request order.
    ///
    /// A network with zero live hosts yields an empty list, not an error,
    /// and no single probe failure can abort the rest of the scan.
    pub async fn scan(&self, networks: &[Network]) -> anyhow::Result<ScanResult> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit));
        let mut tasks: JoinSet<(usize, Ipv4Addr, bool)> = JoinSet::new();

        'dispatch: for (net_idx, network) in networks.iter().enumerate() {
            debug!("dispatching {} probes for {network}", network.host_count());

            for addr in network.hosts() {
                if self.cancel.load(Ordering::Relaxed) {
                    info!("scan cancelled, no further probes will be dispatched");
                    break 'dispatch;
                }

                // Gates dispatch: at most `concurrency_limit` permits exist.
                let permit = semaphore
                    .clone()
                    .acquire_owned()
                    .await
                    .context("probe semaphore closed")?;

                let prober = self.prober.clone();
                let progress = self.progress.clone();
                let timeout = self.config.timeout;

                tasks.spawn(async move {
                    let result = prober.probe(addr, timeout).await;
                    drop(permit);

                    if let Some(report) = &progress {
                        report(result.addr, result.alive);
                    }

                    (net_idx, result.addr, result.alive)
                });
            }
        }

        let mut live: Vec<Vec<Ipv4Addr>> = vec![Vec::new(); networks.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((net_idx, addr, true)) => live[net_idx].push(addr),
                Ok((_, _, false)) => {}
                // A panicked probe task costs one address, not the scan.
                Err(e) => error!("probe task failed: {e}"),
            }
        }

        // Completion order must never show through.
        for hosts in &mut live {
            hosts.sort_unstable();
        }

        let entries = networks.iter().cloned().zip(live).collect();
        Ok(ScanResult::new(entries))
    }
}
