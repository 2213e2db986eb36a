use serde::{Deserialize, Serialize};

/// One named reading in a SenML-style list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "u", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "v")]
    pub value: f64,
}

impl Measurement {
    pub fn new(name: impl Into<String>, unit: Option<&str>, value: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.map(str::to_string),
            value,
        }
    }
}

/// Body of `POST api/v1/senml`: a flat, order-preserving reading list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenmlEnvelope {
    #[serde(rename = "e")]
    pub entries: Vec<Measurement>,
}
