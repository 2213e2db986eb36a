//! Host-facing capability surface. The host runtime calls the plugin
//! through these small traits instead of a plugin base-class hierarchy.

use async_trait::async_trait;
use tinarelay_api::models::{EventKind, EventPayload, TemperatureReading};

use crate::configs::Settings;
use crate::services::EventService;

/// Called once after the host has finished starting up.
#[async_trait]
pub trait LifecycleHook {
    async fn on_after_startup(&self);
}

/// Receives every host event by name, together with its payload.
#[async_trait]
pub trait EventHandler {
    async fn on_event(&self, event: &str, payload: EventPayload);
}

/// Supplies the default settings tree the host seeds its store with.
pub trait SettingsProvider {
    fn settings_defaults(&self) -> Settings;
}

/// Host-implemented source of current printer temperatures, polled by the
/// measurement auto-post timer.
pub trait TelemetrySource: Send + Sync {
    fn current_temperatures(&self) -> Vec<TemperatureReading>;
}

/// Telemetry source for hosts without printer temperature access; the
/// measurement auto-post becomes a no-op.
pub struct NullTelemetry;

impl TelemetrySource for NullTelemetry {
    fn current_temperatures(&self) -> Vec<TemperatureReading> {
        Vec::new()
    }
}

#[async_trait]
impl LifecycleHook for EventService {
    async fn on_after_startup(&self) {
        tracing::info!("Tinamous relay plugin starting timers");

        self.start_timers().await;
    }
}

#[async_trait]
impl EventHandler for EventService {
    async fn on_event(&self, event: &str, payload: EventPayload) {
        self.handle_event(EventKind::from_host_name(event), payload)
            .await;
    }
}

impl SettingsProvider for EventService {
    fn settings_defaults(&self) -> Settings {
        Settings::default()
    }
}
