use std::time::Duration;

use async_trait::async_trait;

use crate::errors::SnapshotError;

/// A camera frame as fetched from the host webcam URL.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Current-image source. Seam for the event router; the real
/// implementation pulls from the host's webcam snapshot URL.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<Snapshot, SnapshotError>;
}

pub struct SnapshotService {
    client: reqwest::Client,
    snapshot_url: Option<String>,
}

impl SnapshotService {
    pub fn new(snapshot_url: Option<String>, timeout_secs: u64) -> Result<Self, SnapshotError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            snapshot_url: snapshot_url.filter(|url| !url.is_empty()),
        })
    }
}

#[async_trait]
impl SnapshotSource for SnapshotService {
    async fn fetch(&self) -> Result<Snapshot, SnapshotError> {
        let url = self
            .snapshot_url
            .as_deref()
            .ok_or(SnapshotError::Unconfigured)?;

        let response = self.client.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let bytes = response.bytes().await?.to_vec();

        tracing::debug!("Fetched snapshot: {} ({} bytes)", content_type, bytes.len());

        Ok(Snapshot {
            content_type,
            bytes,
        })
    }
}
