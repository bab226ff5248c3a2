//! Reachability check backed by the system `ping` utility.
//!
//! One echo request per probe, all output discarded; the exit status is the
//! liveness verdict. Shelling out keeps the tool unprivileged: raw ICMP
//! sockets need root, the distribution's ping binary does not.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

use super::{ProbeResult, Prober};

#[derive(Debug, Default)]
pub struct PingProber;

impl PingProber {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Prober for PingProber {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeResult {
        let started = Instant::now();

        let alive = match tokio::time::timeout(timeout, run_ping(addr, timeout)).await {
            Ok(Ok(success)) => success,
            Ok(Err(e)) => {
                warn!("could not invoke ping for {addr}: {e}");
                false
            }
            // Deadline hit before ping's own timeout fired.
            Err(_) => false,
        };

        ProbeResult {
            addr,
            alive,
            elapsed: started.elapsed(),
        }
    }
}

async fn run_ping(addr: Ipv4Addr, timeout: Duration) -> std::io::Result<bool> {
    let status = ping_command(addr, timeout)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        // A probe dropped at the deadline must not leave a child behind.
        .kill_on_drop(true)
        .status()
        .await?;

    Ok(status.success())
}

#[cfg(not(windows))]
fn ping_command(addr: Ipv4Addr, timeout: Duration) -> Command {
    let secs = timeout.as_secs().max(1);
    let mut cmd = Command::new("ping");
    cmd.arg("-c")
        .arg("1")
        .arg("-W")
        .arg(secs.to_string())
        .arg(addr.to_string());
    cmd
}

#[cfg(windows)]
fn ping_command(addr: Ipv4Addr, timeout: Duration) -> Command {
    let millis = timeout.as_millis().max(1);
    let mut cmd = Command::new("ping");
    cmd.arg("-n")
        .arg("1")
        .arg("-w")
        .arg(millis.to_string())
        .arg(addr.to_string());
    cmd
}
