//! # Name Resolution
//!
//! Turns live addresses into display names with a strict three-tier
//! precedence, first match wins:
//!
//! 1. the static host map (user configuration always beats dynamic data);
//! 2. reverse DNS, only when explicitly enabled, since it costs one bounded
//!    lookup per live host;
//! 3. the address's own dotted-quad text.
//!
//! DNS failure or timeout is not an error; it falls through silently to
//! the next tier.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use rollcall_common::config::ScanConfig;

use crate::scanner::ScanResult;

/// Resolved display names, keyed by live address.
pub type NameBindings = HashMap<Ipv4Addr, String>;

/// PTR-style reverse lookup with a deadline. `None` on failure or timeout.
#[async_trait]
pub trait ReverseDns: Send + Sync {
    async fn lookup(&self, addr: Ipv4Addr, timeout: Duration) -> Option<String>;
}

/// Reverse lookup through the operating system's resolver.
///
/// The underlying call is blocking, so it runs on the blocking pool; the
/// timeout bounds how long a probe-side caller waits, not the OS call
/// itself.
#[derive(Debug, Default)]
pub struct SystemDns;

#[async_trait]
impl ReverseDns for SystemDns {
    async fn lookup(&self, addr: Ipv4Addr, timeout: Duration) -> Option<String> {
        let task =
            tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&IpAddr::V4(addr)).ok());

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(name)) => name,
            _ => None,
        }
    }
}

pub struct Resolver {
    static_hosts: HashMap<Ipv4Addr, String>,
    dns: Arc<dyn ReverseDns>,
    dns_enabled: bool,
    timeout: Duration,
}

impl Resolver {
    pub fn new(
        static_hosts: HashMap<Ipv4Addr, String>,
        dns: Arc<dyn ReverseDns>,
        config: &ScanConfig,
    ) -> Self {
        Self {
            static_hosts,
            dns,
            dns_enabled: config.dns_enabled,
            timeout: config.timeout,
        }
    }

    /// Resolves one address through the precedence chain.
    pub async fn resolve(&self, addr: Ipv4Addr) -> String {
        if let Some(name) = self.static_hosts.get(&addr) {
            return name.clone();
        }

        if self.dns_enabled {
            if let Some(name) = self.dns.lookup(addr, self.timeout).await {
                debug!("reverse lookup {addr} -> {name}");
                return shortname(&name).to_string();
            }
        }

        addr.to_string()
    }

    /// Resolves every live address of a scan.
    ///
    /// When DNS is enabled the lookups are fanned out under the same
    /// concurrency cap as the scan itself; each lookup carries its own
    /// timeout, so a stalled resolver cannot stall the report.
    pub async fn resolve_all(self: Arc<Self>, scan: &ScanResult, limit: usize) -> NameBindings {
        let mut bindings = NameBindings::new();

        if !self.dns_enabled {
            // No blocking work per address; resolve inline.
            for addr in scan.live_addrs() {
                bindings.insert(addr, self.resolve(addr).await);
            }
            return bindings;
        }

        let semaphore = Arc::new(Semaphore::new(limit.max(1)));
        let mut tasks: JoinSet<(Ipv4Addr, String)> = JoinSet::new();

        for addr in scan.live_addrs() {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let resolver = self.clone();
            tasks.spawn(async move {
                let name = resolver.resolve(addr).await;
                drop(permit);
                (addr, name)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((addr, name)) => {
                    bindings.insert(addr, name);
                }
                Err(e) => error!("resolver task failed: {e}"),
            }
        }

        bindings
    }
}

/// The label before the first dot: `host.example.net` reports as `host`.
fn shortname(fqdn: &str) -> &str {
    fqdn.split('.').next().unwrap_or(fqdn)
}
