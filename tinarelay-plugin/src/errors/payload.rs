#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The event payload is missing fields its handler requires.
    #[error("Malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
