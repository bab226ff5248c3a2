use std::time::Duration;

use crate::error::ScanError;

/// Engine-wide scan settings, validated once at construction and read-only
/// afterwards (shared by every concurrent probe).
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of probes in flight at once, across all networks.
    pub concurrency_limit: usize,
    /// Per-probe (and per-DNS-lookup) deadline.
    pub timeout: Duration,
    /// Whether live addresses get a reverse-DNS lookup during resolution.
    pub dns_enabled: bool,
}

impl ScanConfig {
    pub fn new(
        concurrency_limit: usize,
        timeout: Duration,
        dns_enabled: bool,
    ) -> Result<Self, ScanError> {
        if concurrency_limit == 0 {
            return Err(ScanError::InvalidConfig(
                "concurrency limit must be at least 1".into(),
            ));
        }
        if timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "probe timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            concurrency_limit,
            timeout,
            dns_enabled,
        })
    }
}
