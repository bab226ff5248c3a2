//! Deterministic probe and DNS doubles, instrumented so tests can observe
//! concurrency and call counts without touching the real network.

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use rollcall_core::probe::{ProbeResult, Prober};
use rollcall_core::resolver::ReverseDns;

/// Prober that reports a fixed set of addresses as alive. With jitter
/// enabled, each probe sleeps a random few milliseconds so completion
/// order differs from dispatch order.
pub struct StubProber {
    alive: HashSet<Ipv4Addr>,
    jitter: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubProber {
    pub fn new(alive: &[Ipv4Addr]) -> Arc<Self> {
        Arc::new(Self {
            alive: alive.iter().copied().collect(),
            jitter: false,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn with_jitter(alive: &[Ipv4Addr]) -> Arc<Self> {
        Arc::new(Self {
            alive: alive.iter().copied().collect(),
            jitter: true,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    /// Highest number of probes this stub ever saw in flight at once.
    pub fn max_observed(&self) -> usize {
        self.max_in_flight.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Prober for StubProber {
    async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeResult {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if self.jitter {
            let millis = rand::random_range(0..5u64);
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        let alive = self.alive.contains(&addr);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        ProbeResult {
            addr,
            alive,
            elapsed: Duration::ZERO,
        }
    }
}

/// Reverse DNS double with canned answers; addresses not in the map fail.
pub struct StubDns {
    names: HashMap<Ipv4Addr, String>,
    calls: AtomicUsize,
}

impl StubDns {
    pub fn new(names: &[(Ipv4Addr, &str)]) -> Arc<Self> {
        Arc::new(Self {
            names: names
                .iter()
                .map(|(addr, name)| (*addr, name.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Self::new(&[])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ReverseDns for StubDns {
    async fn lookup(&self, addr: Ipv4Addr, _timeout: Duration) -> Option<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.names.get(&addr).cloned()
    }
}
