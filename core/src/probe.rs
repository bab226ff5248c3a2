//! The central **abstraction** for reachability probing.
//!
//! This module defines the unified interface every probe mechanism must
//! implement. The scanner depends strictly on this abstraction, so the
//! concrete check (system ping, a raw socket, a test stub) stays swappable
//! without touching the orchestration logic.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

pub mod ping;

/// The outcome of probing one address. Produced exactly once per address
/// per scan and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub addr: Ipv4Addr,
    pub alive: bool,
    pub elapsed: Duration,
}

/// A reachability check for a single address.
///
/// Contract:
/// * must not block past `timeout`;
/// * probes for different addresses are independent and safe to run
///   concurrently from multiple workers;
/// * an internal failure to invoke the underlying mechanism yields
///   `alive = false` (logged by the implementation), never an error that
///   would abort the surrounding scan.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeResult;
}
