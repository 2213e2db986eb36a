#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// No webcam snapshot URL configured. The expected "no camera" case,
    /// not a fault.
    #[error("No webcam snapshot URL configured")]
    Unconfigured,

    #[error("Snapshot fetch failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SnapshotError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
