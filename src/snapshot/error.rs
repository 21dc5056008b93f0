use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Snapshot format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Decoded fine, but the fields contradict each other.
    #[error("Snapshot does not describe a reachable session: {0}")]
    Inconsistent(String),
}
