use serde::{Deserialize, Serialize};

/// Measurement block published by the Pi Power module. Every top-level
/// field is required; a block missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerPayload {
    pub voltage: f64,
    pub current_milli_amps: f64,
    pub power_watts: f64,
    pub light_level: f64,
    pub temperatures: Vec<TemperatureReading>,
    pub fans: Vec<FanReading>,
    pub gpio_values: Vec<GpioReading>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureReading {
    pub sensor_id: String,
    /// Degrees Celsius.
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanReading {
    pub fan_id: u32,
    pub state: bool,
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpioReading {
    pub pin: u32,
    pub value: f64,
}
