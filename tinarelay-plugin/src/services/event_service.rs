use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tinarelay_api::models::{
    EventKind, EventPayload, Measurement, MediaPost, SenmlEnvelope, StatusPost,
};
use tokio::sync::Mutex;

use crate::configs::{EventConfig, Settings};
use crate::errors::SnapshotError;
use crate::plugin::TelemetrySource;
use crate::services::delivery_service::Delivery;
use crate::services::snapshot_service::{Snapshot, SnapshotSource};
use crate::services::timer_service::RepeatedTimer;
use crate::services::{measurement, message_format};

const AUTO_PICTURE_CAPTION: &str = "Printing, printing printing printing.... {tag}";
const MEDIA_TAG: &str = "OctoPrint";

/// Routes host events to the reporting service and owns the two auto-post
/// timers. Timer callbacks may run concurrently with event handling, so
/// the timer slots sit behind async mutexes and are replaced wholesale
/// when the cadence changes.
pub struct EventService {
    settings: Arc<Settings>,
    delivery: Arc<dyn Delivery>,
    snapshots: Arc<dyn SnapshotSource>,
    telemetry: Arc<dyn TelemetrySource>,
    picture_timer: Mutex<Option<RepeatedTimer>>,
    measurements_timer: Mutex<Option<RepeatedTimer>>,
    printing: Arc<AtomicBool>,
}

impl EventService {
    pub fn new(
        settings: Arc<Settings>,
        delivery: Arc<dyn Delivery>,
        snapshots: Arc<dyn SnapshotSource>,
        telemetry: Arc<dyn TelemetrySource>,
    ) -> Self {
        Self {
            settings,
            delivery,
            snapshots,
            telemetry,
            picture_timer: Mutex::new(None),
            measurements_timer: Mutex::new(None),
            printing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts both auto-post timers with the idle picture cadence. Called
    /// once by the host after startup.
    pub async fn start_timers(&self) {
        if !self.settings.enabled {
            return;
        }

        self.start_measurements_timer().await;

        let idle = self.settings.auto_post_picture.interval_when_idle_minutes;
        self.restart_picture_timer(Duration::from_secs(idle * 60))
            .await;
    }

    /// Host event entry point. Delivery and snapshot failures are logged
    /// here and never propagate to the host.
    pub async fn handle_event(&self, kind: EventKind, payload: EventPayload) {
        if kind == EventKind::PowerMeasured {
            self.handle_power_measurements(&payload).await;
            return;
        }

        match kind {
            EventKind::PrintStarted | EventKind::PrintResumed => {
                self.printing.store(true, Ordering::SeqCst);

                let minutes = self.settings.auto_post_picture.interval_minutes;
                self.restart_picture_timer(Duration::from_secs(minutes * 60))
                    .await;
            }
            EventKind::PrintDone
            | EventKind::PrintFailed
            | EventKind::PrintCancelled
            | EventKind::PrintPaused => {
                self.printing.store(false, Ordering::SeqCst);

                let minutes = self.settings.auto_post_picture.interval_when_idle_minutes;
                self.restart_picture_timer(Duration::from_secs(minutes * 60))
                    .await;
            }
            _ => {}
        }

        match self.settings.print_events.get(kind.name()) {
            Some(config) if config.enabled => {
                self.post_event_status_message(config, &payload).await;
            }
            _ => {
                tracing::debug!("Not configured for event: {}", kind.name());
            }
        }
    }

    async fn handle_power_measurements(&self, payload: &EventPayload) {
        if !self.settings.enabled {
            return;
        }

        let envelope = match measurement::encode_power(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!("Dropping power measurements: {}", e);
                return;
            }
        };

        if let Err(e) = self.delivery.post_measurements(envelope).await {
            tracing::error!("Error posting power measurements: {}", e);
        }
    }

    async fn post_event_status_message(&self, config: &EventConfig, payload: &EventPayload) {
        let text = message_format::format_message(&config.message, payload);

        if config.include_picture {
            match self.snapshots.fetch().await {
                Ok(snapshot) => {
                    let media = build_media_post(
                        snapshot,
                        text.clone(),
                        String::new(),
                        &self.settings.auto_post_picture.include_hashtag,
                    );

                    match self.delivery.post_media(media).await {
                        Ok(id) => tracing::debug!("Posted event picture, id: {}", id),
                        Err(e) => tracing::error!("Error posting event picture: {}", e),
                    }
                    return;
                }
                Err(SnapshotError::Unconfigured) => {
                    tracing::info!("No snapshot URL, posting text-only status");
                }
                Err(e) => {
                    tracing::warn!("Snapshot failed, posting text-only status: {}", e);
                }
            }
        }

        let status = StatusPost {
            message: text,
            lite: true,
        };

        if let Err(e) = self.delivery.post_status(status).await {
            tracing::error!("Error posting status: {}", e);
        }
    }

    /// Stops any running picture timer and, when auto-posting is enabled,
    /// starts a fresh one at `period`. The first shot fires only after a
    /// full period.
    async fn restart_picture_timer(&self, period: Duration) {
        let mut slot = self.picture_timer.lock().await;

        if let Some(timer) = slot.take() {
            timer.cancel();
        }

        if !self.settings.auto_post_picture.enabled {
            return;
        }

        let settings = Arc::clone(&self.settings);
        let snapshots = Arc::clone(&self.snapshots);
        let delivery = Arc::clone(&self.delivery);

        *slot = Some(RepeatedTimer::start(period, false, move || {
            let settings = Arc::clone(&settings);
            let snapshots = Arc::clone(&snapshots);
            let delivery = Arc::clone(&delivery);

            async move {
                Self::auto_post_picture(&settings, snapshots.as_ref(), delivery.as_ref()).await;
            }
        }));

        tracing::info!("Started auto-post picture timer at {:?}", period);
    }

    /// Starts the measurement timer with an immediate first shot.
    async fn start_measurements_timer(&self) {
        if !self.settings.auto_post_measurements.enabled {
            return;
        }

        let period = Duration::from_secs(self.settings.auto_post_measurements.interval_minutes * 60);

        let settings = Arc::clone(&self.settings);
        let telemetry = Arc::clone(&self.telemetry);
        let delivery = Arc::clone(&self.delivery);
        let printing = Arc::clone(&self.printing);

        let mut slot = self.measurements_timer.lock().await;
        *slot = Some(RepeatedTimer::start(period, true, move || {
            let settings = Arc::clone(&settings);
            let telemetry = Arc::clone(&telemetry);
            let delivery = Arc::clone(&delivery);
            let printing = Arc::clone(&printing);

            async move {
                Self::auto_post_measurements(
                    &settings,
                    telemetry.as_ref(),
                    delivery.as_ref(),
                    &printing,
                )
                .await;
            }
        }));

        tracing::info!("Started auto-post measurements timer at {:?}", period);
    }

    async fn auto_post_picture(
        settings: &Settings,
        snapshots: &dyn SnapshotSource,
        delivery: &dyn Delivery,
    ) {
        let picture = &settings.auto_post_picture;
        let caption = AUTO_PICTURE_CAPTION.replace("{tag}", &picture.include_hashtag);

        match snapshots.fetch().await {
            Ok(snapshot) => {
                let media = build_media_post(
                    snapshot,
                    caption,
                    picture.media_unique_id.clone(),
                    &picture.include_hashtag,
                );

                match delivery.post_media(media).await {
                    Ok(id) => tracing::info!("Auto-posted picture, id: {}", id),
                    Err(e) => tracing::error!("Auto post picture error: {}", e),
                }
            }
            Err(SnapshotError::Unconfigured) => {
                tracing::info!("Unable to auto-post picture, no snapshot URL");
            }
            Err(e) => tracing::error!("Auto post picture error: {}", e),
        }
    }

    async fn auto_post_measurements(
        settings: &Settings,
        telemetry: &dyn TelemetrySource,
        delivery: &dyn Delivery,
        printing: &AtomicBool,
    ) {
        let config = &settings.auto_post_measurements;

        if config.during_printing_only && !printing.load(Ordering::SeqCst) {
            return;
        }

        let readings = telemetry.current_temperatures();
        if readings.is_empty() {
            tracing::debug!("No printer temperatures to post");
            return;
        }

        let entries = readings
            .into_iter()
            .map(|reading| Measurement::new(reading.sensor_id, Some("°C"), reading.value))
            .collect();

        if let Err(e) = delivery.post_measurements(SenmlEnvelope { entries }).await {
            tracing::error!("Error auto-posting measurements: {}", e);
        }
    }

    /// Stops both timers. Idempotent; used on host shutdown.
    pub async fn stop_timers(&self) {
        if let Some(timer) = self.picture_timer.lock().await.take() {
            timer.cancel();
        }
        if let Some(timer) = self.measurements_timer.lock().await.take() {
            timer.cancel();
        }
    }
}

fn build_media_post(
    snapshot: Snapshot,
    caption: String,
    unique_media_name: String,
    hashtag: &str,
) -> MediaPost {
    MediaPost {
        content_type: snapshot.content_type,
        base64_media: BASE64.encode(&snapshot.bytes),
        caption,
        description: String::new(),
        unique_media_name,
        tags: vec![MEDIA_TAG.to_string(), hashtag.to_string()],
        create_status_post: true,
    }
}
