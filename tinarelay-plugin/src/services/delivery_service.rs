use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tinarelay_api::models::{MediaPost, MediaResponse, SenmlEnvelope, StatusPost};

use crate::configs::Service;
use crate::errors::DeliveryError;

pub const STATUS_ENDPOINT: &str = "api/v1/Status";
pub const MEDIA_ENDPOINT: &str = "api/v1/media";
pub const SENML_ENDPOINT: &str = "api/v1/senml";

/// Outbound posts to the reporting service. Seam for the event router so
/// tests can count calls without a network.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn post_status(&self, status: StatusPost) -> Result<(), DeliveryError>;

    /// Uploads a media item, returning the service-assigned id.
    async fn post_media(&self, media: MediaPost) -> Result<String, DeliveryError>;

    async fn post_measurements(&self, envelope: SenmlEnvelope) -> Result<(), DeliveryError>;
}

pub struct DeliveryService {
    client: reqwest::Client,
    service: Service,
}

impl DeliveryService {
    pub fn new(service: Service) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()?;

        Ok(Self { client, service })
    }

    fn endpoint_url(&self, fragment: &str) -> Result<String, DeliveryError> {
        if self.service.account_name.is_empty() {
            return Err(DeliveryError::Configuration);
        }

        match &self.service.base_url {
            Some(base) => Ok(format!("{}/{fragment}", base.trim_end_matches('/'))),
            None => Ok(format!(
                "https://{}.{}/{fragment}",
                self.service.account_name, self.service.domain
            )),
        }
    }

    async fn post_json<T: Serialize>(
        &self,
        fragment: &str,
        body: &T,
    ) -> Result<reqwest::Response, DeliveryError> {
        let url = self.endpoint_url(fragment)?;

        tracing::debug!("Posting to reporting service: {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.service.username, Some(&self.service.password))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(DeliveryError::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Delivery for DeliveryService {
    async fn post_status(&self, status: StatusPost) -> Result<(), DeliveryError> {
        self.post_json(STATUS_ENDPOINT, &status).await?;

        tracing::debug!("Posted status successfully");

        Ok(())
    }

    async fn post_media(&self, media: MediaPost) -> Result<String, DeliveryError> {
        let response = self.post_json(MEDIA_ENDPOINT, &media).await?;

        let media_response: MediaResponse = response.json().await?;

        tracing::debug!("Posted media successfully, id: {}", media_response.id);

        Ok(media_response.id)
    }

    async fn post_measurements(&self, envelope: SenmlEnvelope) -> Result<(), DeliveryError> {
        self.post_json(SENML_ENDPOINT, &envelope).await?;

        tracing::debug!("Posted measurements successfully");

        Ok(())
    }
}
