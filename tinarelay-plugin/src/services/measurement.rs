use serde_json::Value;
use tinarelay_api::models::{EventPayload, Measurement, PowerPayload, SenmlEnvelope};

use crate::errors::PayloadError;

/// Flattens a Pi Power measurement block into a SenML envelope. Entry
/// order is fixed: V, I, Power, Light, temperatures, fans, then GPIO pins.
/// Zero-valued GPIO pins are omitted on purpose.
pub fn encode_power(payload: &EventPayload) -> Result<SenmlEnvelope, PayloadError> {
    let power: PowerPayload = serde_json::from_value(Value::Object(payload.0.clone()))?;

    let mut entries = vec![
        Measurement::new("V", Some("V"), power.voltage),
        Measurement::new("I", Some("mA"), power.current_milli_amps),
        Measurement::new("Power", Some("W"), power.power_watts),
        Measurement::new("Light", Some("Lux"), power.light_level),
    ];

    for temperature in &power.temperatures {
        entries.push(Measurement::new(
            temperature.sensor_id.clone(),
            Some("°C"),
            temperature.value,
        ));
    }

    for fan in &power.fans {
        entries.push(Measurement::new(
            format!("Fan{}.State", fan.fan_id),
            None,
            if fan.state { 1.0 } else { 0.0 },
        ));
        entries.push(Measurement::new(
            format!("Fan{}.Speed", fan.fan_id),
            None,
            fan.speed,
        ));
    }

    for gpio in &power.gpio_values {
        if gpio.value != 0.0 {
            entries.push(Measurement::new(format!("Pin{}", gpio.pin), None, gpio.value));
        }
    }

    Ok(SenmlEnvelope { entries })
}
