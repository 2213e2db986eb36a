use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// Destination account on the reporting service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Account name, e.g. Demo.Tinamous.com -> "Demo". Empty means
    /// delivery is not configured.
    pub account_name: String,
    /// Basic-auth device logon.
    pub username: String,
    pub password: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Full endpoint base override for dev hosts and tests. The account
    /// name must still be set for any delivery to happen.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Webcam {
    #[serde(default)]
    pub snapshot_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoPostMeasurements {
    pub enabled: bool,
    pub interval_minutes: u64,
    pub during_printing_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoPostPicture {
    pub enabled: bool,
    /// Cadence while a print is running.
    pub interval_minutes: u64,
    /// Cadence while the printer is idle.
    pub interval_when_idle_minutes: u64,
    pub include_hashtag: String,
    /// Stable media name so the service can group the photos into a
    /// timeseries view. Empty for unrelated posts.
    pub media_unique_id: String,
}

/// Per-event notification behaviour, keyed by host event name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    pub message: String,
    pub enabled: bool,
    pub include_picture: bool,
}

impl EventConfig {
    fn on(message: &str) -> Self {
        Self {
            message: message.to_string(),
            enabled: true,
            include_picture: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub enabled: bool,
    pub logger: Logger,
    pub service: Service,
    #[serde(default)]
    pub webcam: Webcam,
    pub auto_post_measurements: AutoPostMeasurements,
    pub auto_post_picture: AutoPostPicture,
    pub print_events: BTreeMap<String, EventConfig>,
}

fn default_domain() -> String {
    "tinamous.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        let print_events = BTreeMap::from([
            (
                "WhosPrinting".to_string(),
                EventConfig::on("Ohhh Hello... {username} is printing!"),
            ),
            (
                "PrintStarted".to_string(),
                EventConfig::on("Yay, a new print has started! Filename: {filename}"),
            ),
            (
                "PrintFailed".to_string(),
                EventConfig::on("Oh no! The print has failed :-(. Reason: {reason}"),
            ),
            (
                "PrintCancelled".to_string(),
                EventConfig::on("Uh oh... the print was cancelled!"),
            ),
            (
                "PrintDone".to_string(),
                EventConfig::on("Print finished successfully!"),
            ),
            (
                "PrintPaused".to_string(),
                EventConfig::on("Printing has been paused..."),
            ),
            (
                "PrintResumed".to_string(),
                EventConfig::on("Phew! Printing has been resumed! Back to work..."),
            ),
            (
                "LabelPrintDone".to_string(),
                EventConfig::on("Badger Label Printed. {filename} Label Type: {labeltype}"),
            ),
        ]);

        Self {
            enabled: true,
            logger: Logger {
                level: "info".to_string(),
            },
            service: Service {
                account_name: String::new(),
                username: String::new(),
                password: String::new(),
                domain: default_domain(),
                base_url: None,
                timeout_secs: default_timeout_secs(),
            },
            webcam: Webcam::default(),
            auto_post_measurements: AutoPostMeasurements {
                enabled: true,
                interval_minutes: 1,
                during_printing_only: false,
            },
            auto_post_picture: AutoPostPicture {
                enabled: true,
                interval_minutes: 5,
                interval_when_idle_minutes: 20,
                include_hashtag: "#TodayOnTheUltimaker".to_string(),
                media_unique_id: String::new(),
            },
            print_events,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let settings: Settings = toml::from_str(&fs::read_to_string(path)?)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Rejects interval values the timers cannot run at.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.auto_post_measurements.interval_minutes == 0 {
            return Err("auto_post_measurements.interval_minutes must be at least 1".into());
        }

        if self.auto_post_picture.interval_minutes == 0
            || self.auto_post_picture.interval_when_idle_minutes == 0
        {
            return Err("auto_post_picture intervals must be at least 1 minute".into());
        }

        Ok(())
    }

    /// Folds non-null fields of `right` over `left`. Used to apply the
    /// host settings store on top of the defaults.
    pub fn merge<L, R, T>(left: L, right: R) -> Result<T, Box<dyn Error>>
    where
        L: Serialize,
        R: Serialize,
        T: Serialize + DeserializeOwned,
    {
        let mut left_map = serde_json::to_value(&left)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or("Failed to serialize left value which is not an object")?;

        let mut right_map = serde_json::to_value(&right)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or("Failed to serialize right value which is not an object")?;

        right_map.retain(|_, v| !v.is_null());
        left_map.extend(right_map);

        let value = serde_json::to_value(&left_map)?;

        Ok(serde_json::from_value(value)?)
    }
}
