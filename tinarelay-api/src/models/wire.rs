use serde::{Deserialize, Serialize};

/// Body of `POST api/v1/Status`. Field casing is the service contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusPost {
    pub message: String,
    /// A lite post carries no attached media item.
    pub lite: bool,
}

/// Body of `POST api/v1/media`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaPost {
    pub content_type: String,
    pub base64_media: String,
    pub caption: String,
    pub description: String,
    /// Stable name letting the service group posts into a timeseries view.
    pub unique_media_name: String,
    pub tags: Vec<String>,
    /// When true the service also creates a status post linked to the media.
    pub create_status_post: bool,
}

/// Success response of `POST api/v1/media`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaResponse {
    pub id: String,
}
