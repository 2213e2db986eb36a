use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Printer lifecycle and auxiliary events delivered by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PrintStarted,
    PrintDone,
    PrintFailed,
    PrintCancelled,
    PrintPaused,
    PrintResumed,
    /// Custom event fired by the "Who's Printing" host plugin.
    WhosPrinting,
    /// Custom event fired when a badger label finishes printing.
    LabelPrintDone,
    /// Periodic voltage/current/temperature block from the Pi Power module.
    PowerMeasured,
    /// Any host event this plugin has no routing for.
    Other(String),
}

impl EventKind {
    /// Maps the host's event name to a kind. Unknown names are preserved
    /// as `Other` so the router can log them.
    pub fn from_host_name(name: &str) -> Self {
        match name {
            "PrintStarted" => Self::PrintStarted,
            "PrintDone" => Self::PrintDone,
            "PrintFailed" => Self::PrintFailed,
            "PrintCancelled" => Self::PrintCancelled,
            "PrintPaused" => Self::PrintPaused,
            "PrintResumed" => Self::PrintResumed,
            "WhosPrinting" => Self::WhosPrinting,
            "LabelPrintDone" => Self::LabelPrintDone,
            "PiPowerMeasured" => Self::PowerMeasured,
            other => Self::Other(other.to_string()),
        }
    }

    /// The host-side event name, also the key into `print_events` settings.
    pub fn name(&self) -> &str {
        match self {
            Self::PrintStarted => "PrintStarted",
            Self::PrintDone => "PrintDone",
            Self::PrintFailed => "PrintFailed",
            Self::PrintCancelled => "PrintCancelled",
            Self::PrintPaused => "PrintPaused",
            Self::PrintResumed => "PrintResumed",
            Self::WhosPrinting => "WhosPrinting",
            Self::LabelPrintDone => "LabelPrintDone",
            Self::PowerMeasured => "PiPowerMeasured",
            Self::Other(name) => name,
        }
    }
}

/// Untyped event payload from the host. Shape depends on the event kind
/// and any field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload(pub Map<String, Value>);

impl EventPayload {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Non-empty string value for `key`, if any.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// True when `key` is present, regardless of its value.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }
}

impl From<Map<String, Value>> for EventPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
