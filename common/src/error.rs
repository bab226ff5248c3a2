use thiserror::Error;

/// Fatal error kinds surfaced by the engine.
///
/// Per-host probe or DNS failures are deliberately *not* represented here:
/// they are recorded as dead hosts / unresolved names so that one bad host
/// never aborts the rest of a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The CIDR string did not parse or the prefix length is out of range.
    #[error("invalid network '{input}': {reason}")]
    InvalidNetwork { input: String, reason: String },

    /// The scan settings failed validation at construction.
    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),
}
