//! # Network Model & Address Enumeration
//!
//! A [`Network`] is one CIDR prefix to be scanned, plus the optional label
//! used when reporting it. Parsing is the only fallible step; once built, a
//! `Network` is immutable and freely shareable across probe workers.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnetwork::Ipv4Network;

use crate::error::ScanError;

/// A single IPv4 CIDR range with an optional human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Network {
    cidr: Ipv4Network,
    label: Option<String>,
}

impl Network {
    /// Parses a CIDR string (`"10.0.0.0/24"`, or a bare address treated as
    /// a `/32`) into a `Network`. Host bits below the prefix are masked off,
    /// so `10.0.0.5/24` and `10.0.0.0/24` denote the same range.
    pub fn parse(input: &str, label: Option<String>) -> Result<Self, ScanError> {
        let parsed = Ipv4Network::from_str(input.trim()).map_err(|e| ScanError::InvalidNetwork {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        let cidr = Ipv4Network::new(parsed.network(), parsed.prefix()).map_err(|e| {
            ScanError::InvalidNetwork {
                input: input.to_string(),
                reason: e.to_string(),
            }
        })?;

        let label = label.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());

        Ok(Self { cidr, label })
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn prefix(&self) -> u8 {
        self.cidr.prefix()
    }

    /// Header text for this network: the label when one was given,
    /// otherwise the canonical CIDR string.
    pub fn title(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.to_string(),
        }
    }

    /// Every address in the prefix range, ascending, no duplicates.
    ///
    /// Network and broadcast addresses are included on purpose: the scanner
    /// answers a presence question, not a routing question, so a `/n` yields
    /// exactly `2^(32 - n)` addresses.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.cidr.network().into();
        let end: u32 = self.cidr.broadcast().into();
        (start..=end).map(Ipv4Addr::from)
    }

    /// Number of addresses [`hosts`](Self::hosts) will yield.
    pub fn host_count(&self) -> u64 {
        1u64 << (32 - u32::from(self.cidr.prefix()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cidr.network(), self.cidr.prefix())
    }
}

impl FromStr for Network {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::parse(s, None)
    }
}
