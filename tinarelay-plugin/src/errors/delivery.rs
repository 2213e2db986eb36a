#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// No account name configured; delivery is impossible and no request
    /// is attempted.
    #[error("Reporting service account name is not set")]
    Configuration,

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned {status}: {body}")]
    Service { status: u16, body: String },
}
