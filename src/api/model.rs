use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A place the backend knows about, with its map position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// `[latitude, longitude]`
    pub position: [f64; 2],
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            position: [latitude, longitude],
        }
    }

    pub fn latitude(&self) -> f64 {
        self.position[0]
    }

    pub fn longitude(&self) -> f64 {
        self.position[1]
    }
}

/// Wire shape of a location entry. Coordinates may be missing for places
/// that were never geocoded.
#[derive(Debug, Deserialize)]
struct RawLocation {
    name: Option<String>,
    #[serde(default)]
    position: Option<[Option<f64>; 2]>,
}

/// Parse the `/api/locations` body, skipping entries without a name or coordinates.
///
/// Each entry is decoded on its own so one malformed place does not empty the map.
pub fn parse_locations(value: Value) -> Result<Vec<Location>> {
    let raw: Vec<Value> = serde_json::from_value(value)?;
    let total = raw.len();

    let locations: Vec<Location> = raw
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawLocation>(entry).ok())
        .filter_map(|entry| match (entry.name, entry.position) {
            (Some(name), Some([Some(lat), Some(lon)])) if !name.trim().is_empty() => {
                Some(Location::new(name, lat, lon))
            }
            _ => None,
        })
        .collect();

    if locations.len() < total {
        tracing::debug!(
            skipped = total - locations.len(),
            "Dropped locations without usable name or coordinates"
        );
    }

    Ok(locations)
}

/// Parse the `/api/locations_by_vibe/{tag}` body
pub fn parse_location_names(value: Value) -> Result<Vec<String>> {
    let names: Vec<Value> = serde_json::from_value(value)?;
    Ok(string_list(Some(names)))
}

/// Ambience breakdown the backend attaches to a found vibe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VibeDimensions {
    #[serde(default)]
    pub ambience: Option<String>,
    #[serde(default)]
    pub crowd: Option<String>,
    #[serde(default)]
    pub noise_level: Option<String>,
}

impl VibeDimensions {
    pub fn is_empty(&self) -> bool {
        self.ambience.is_none() && self.crowd.is_none() && self.noise_level.is_none()
    }
}

/// A successfully generated vibe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VibeReport {
    pub summary: String,
    pub tags: Vec<String>,
    pub citations: Vec<String>,
    pub emojis: Vec<String>,
    pub dimensions: Option<VibeDimensions>,
}

/// Answer to a vibe lookup.
///
/// The backend tells these apart only by which fields are present; they are
/// resolved into variants here so the view can match exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum VibeResult {
    Found(VibeReport),
    NotFound {
        message: Option<String>,
        suggestions: Vec<String>,
    },
    Error {
        message: String,
        raw_response: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawVibe {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    raw_response: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    suggestions: Option<Vec<Value>>,
    #[serde(default)]
    summary: Option<Value>,
    #[serde(default)]
    tags: Option<Vec<Value>>,
    #[serde(default)]
    citations: Option<Vec<Value>>,
    #[serde(default)]
    emojis: Option<Vec<Value>>,
    #[serde(default)]
    vibe_dimensions: Option<Value>,
}

impl VibeResult {
    /// Build an error result with no raw payload
    pub fn error(message: impl Into<String>) -> Self {
        VibeResult::Error {
            message: message.into(),
            raw_response: None,
        }
    }

    /// Classify a backend response: `error` first, then `status`, else found.
    ///
    /// Fields missing from a found vibe default to empty; only a body that is
    /// not a JSON object fails.
    pub fn from_value(value: Value) -> Result<Self> {
        // Derived struct visitors also accept arrays
        if !value.is_object() {
            return Err(Error::Decode(serde::de::Error::custom(format!(
                "expected a vibe object, got {}",
                value
            ))));
        }
        let raw: RawVibe = serde_json::from_value(value)?;

        if let Some(message) = raw.error.as_ref().and_then(truthy_text) {
            return Ok(VibeResult::Error {
                message,
                raw_response: raw.raw_response.as_ref().and_then(truthy_text),
            });
        }

        if raw.status.as_ref().and_then(Value::as_str) == Some("not_found") {
            return Ok(VibeResult::NotFound {
                message: raw.message.as_ref().and_then(truthy_text),
                suggestions: string_list(raw.suggestions),
            });
        }

        Ok(VibeResult::Found(VibeReport {
            summary: raw.summary.as_ref().and_then(truthy_text).unwrap_or_default(),
            tags: string_list(raw.tags),
            citations: string_list(raw.citations),
            emojis: string_list(raw.emojis),
            dimensions: raw
                .vibe_dimensions
                .as_ref()
                .and_then(dimensions_from)
                .filter(|d| !d.is_empty()),
        }))
    }

    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }
}

/// Text of a field that counts as "set": non-null, non-empty, not `false`.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Dimensions are free-form model output; only an object is kept, and list
/// values are joined.
fn dimensions_from(value: &Value) -> Option<VibeDimensions> {
    let fields = value.as_object()?;
    let text = |key: &str| {
        fields.get(key).and_then(|v| match v {
            Value::Array(items) => {
                let joined = string_list(Some(items.clone())).join(", ");
                (!joined.is_empty()).then_some(joined)
            }
            other => truthy_text(other),
        })
    };

    Some(VibeDimensions {
        ambience: text("ambience"),
        crowd: text("crowd"),
        noise_level: text("noise_level"),
    })
}

fn string_list(values: Option<Vec<Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect()
}
