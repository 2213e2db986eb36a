use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tinarelay_api::models::{
    EventPayload, MediaPost, SenmlEnvelope, StatusPost, TemperatureReading,
};
use tinarelay_plugin::configs::Settings;
use tinarelay_plugin::errors::{DeliveryError, SnapshotError};
use tinarelay_plugin::plugin::TelemetrySource;
use tinarelay_plugin::services::{Delivery, EventService, Snapshot, SnapshotSource};

/// Records every post instead of talking to the network.
#[derive(Default)]
pub struct MockDelivery {
    pub statuses: Mutex<Vec<StatusPost>>,
    pub media: Mutex<Vec<MediaPost>>,
    pub measurements: Mutex<Vec<SenmlEnvelope>>,
}

impl MockDelivery {
    pub fn status_count(&self) -> usize {
        self.statuses.lock().unwrap().len()
    }

    pub fn media_count(&self) -> usize {
        self.media.lock().unwrap().len()
    }

    pub fn measurement_count(&self) -> usize {
        self.measurements.lock().unwrap().len()
    }
}

#[async_trait]
impl Delivery for MockDelivery {
    async fn post_status(&self, status: StatusPost) -> Result<(), DeliveryError> {
        self.statuses.lock().unwrap().push(status);
        Ok(())
    }

    async fn post_media(&self, media: MediaPost) -> Result<String, DeliveryError> {
        self.media.lock().unwrap().push(media);
        Ok("media-1".to_string())
    }

    async fn post_measurements(&self, envelope: SenmlEnvelope) -> Result<(), DeliveryError> {
        self.measurements.lock().unwrap().push(envelope);
        Ok(())
    }
}

pub enum SnapshotBehaviour {
    Image,
    Unconfigured,
    Unreachable,
}

pub struct MockSnapshots {
    pub behaviour: SnapshotBehaviour,
    pub fetches: AtomicUsize,
}

impl MockSnapshots {
    pub fn new(behaviour: SnapshotBehaviour) -> Self {
        Self {
            behaviour,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshots {
    async fn fetch(&self) -> Result<Snapshot, SnapshotError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        match self.behaviour {
            SnapshotBehaviour::Image => Ok(Snapshot {
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            }),
            SnapshotBehaviour::Unconfigured => Err(SnapshotError::Unconfigured),
            SnapshotBehaviour::Unreachable => {
                Err(SnapshotError::Transport("connection refused".to_string()))
            }
        }
    }
}

pub struct FixedTelemetry(pub Vec<TemperatureReading>);

impl TelemetrySource for FixedTelemetry {
    fn current_temperatures(&self) -> Vec<TemperatureReading> {
        self.0.clone()
    }
}

pub struct Harness {
    pub service: EventService,
    pub delivery: Arc<MockDelivery>,
    pub snapshots: Arc<MockSnapshots>,
}

impl Harness {
    pub fn new(settings: Settings, behaviour: SnapshotBehaviour) -> Self {
        Self::with_telemetry(settings, behaviour, FixedTelemetry(Vec::new()))
    }

    pub fn with_telemetry(
        settings: Settings,
        behaviour: SnapshotBehaviour,
        telemetry: FixedTelemetry,
    ) -> Self {
        let delivery = Arc::new(MockDelivery::default());
        let snapshots = Arc::new(MockSnapshots::new(behaviour));

        let service = EventService::new(
            Arc::new(settings),
            delivery.clone(),
            snapshots.clone(),
            Arc::new(telemetry),
        );

        Self {
            service,
            delivery,
            snapshots,
        }
    }
}

pub fn payload(value: serde_json::Value) -> EventPayload {
    EventPayload(value.as_object().cloned().unwrap_or_default())
}

/// Lets tasks woken by a paused-clock advance run to completion.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
