//! Events emitted by the host and actions returned from `handle` hooks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key under which the host stores the id of the widget that emitted an event.
pub const EVENT_ID_KEY: &str = "ID";

/// A user interaction reported by the host: the emitting widget's identity plus
/// an untyped payload (reason, key, whatever the host chooses to attach).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    pub id: String,
    pub payload: Map<String, Value>,
}

impl Event {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: Map::new(),
        }
    }

    /// Attach a payload entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Parse the host's flat `{"ID": ..., ...}` mapping.
    pub fn from_map(mut map: Map<String, Value>) -> Option<Self> {
        let id = match map.remove(EVENT_ID_KEY)? {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Some(Self { id, payload: map })
    }

    /// Flatten back into the host's mapping, with the id under `"ID"`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.payload.clone();
        map.insert(EVENT_ID_KEY.to_string(), Value::String(self.id.clone()));
        map
    }
}

impl Serialize for Event {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::deserialize(deserializer)?;
        Event::from_map(map).ok_or_else(|| serde::de::Error::missing_field(EVENT_ID_KEY))
    }
}

/// What a `handle` hook asks the dialog to do. `None` from a hook means
/// "keep processing events".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Next,
    Back,
    Abort,
    Cancel,
    Custom(String),
}

impl Action {
    /// Map the ids of the standard dialog buttons to their action.
    pub fn from_event_id(id: &str) -> Option<Self> {
        match id {
            "next" | "ok" | "accept" => Some(Action::Next),
            "back" => Some(Action::Back),
            "abort" => Some(Action::Abort),
            "cancel" => Some(Action::Cancel),
            _ => None,
        }
    }

    /// Leaving through `Back`, `Abort` or `Cancel` discards the input, so
    /// neither validation nor storing happens.
    pub fn needs_validation(&self) -> bool {
        matches!(self, Action::Next | Action::Custom(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Next => write!(f, "next"),
            Action::Back => write!(f, "back"),
            Action::Abort => write!(f, "abort"),
            Action::Cancel => write!(f, "cancel"),
            Action::Custom(name) => write!(f, "{}", name),
        }
    }
}
