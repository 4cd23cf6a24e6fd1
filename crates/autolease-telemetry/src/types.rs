//! Provider wire types and the plain records handed back to callers.
//!
//! The provider signals failure by omitting keys (and sometimes by adding an
//! `error` code), so every field the client inspects is optional here.

use serde::{Deserialize, Serialize};

/// Search flag selecting the unit's most recent telemetry message.
pub(crate) const FLAG_LAST_MESSAGE: u32 = 0x400;

/// Search flag selecting basic unit properties (id, name, unique id).
pub(crate) const FLAG_BASE: u32 = 0x1;

/// A live provider session.
#[derive(Clone)]
pub struct Session {
    pub(crate) sid: String,
}

impl Session {
    /// The raw session key sent as `sid` on every authenticated call.
    #[must_use]
    pub fn sid(&self) -> &str {
        &self.sid
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("sid", &"[redacted]").finish()
    }
}

/// Last reported coordinates of a unit, in (latitude, longitude) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// One row of the fleet inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    pub id: i64,
    pub name: String,
    /// Hardware serial (IMEI), when the provider returned it.
    pub unique_id: Option<String>,
}

// ---------------------------------------------------------------------------
// token/login
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub eid: Option<String>,
    #[serde(default)]
    pub error: Option<i64>,
}

// ---------------------------------------------------------------------------
// core/search_item
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItemResponse {
    #[serde(default)]
    pub item: Option<UnitItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnitItem {
    #[serde(default)]
    pub lmsg: Option<LastMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LastMessage {
    #[serde(default)]
    pub pos: Option<RawPosition>,
}

/// Provider position: `x` is longitude, `y` is latitude.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPosition {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl RawPosition {
    /// Remaps to (latitude, longitude); `None` unless both axes are present.
    pub(crate) fn into_position(self) -> Option<Position> {
        Some(Position {
            latitude: self.y?,
            longitude: self.x?,
        })
    }
}

// ---------------------------------------------------------------------------
// core/search_items
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItemsResponse {
    #[serde(default)]
    pub items: Vec<UnitRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnitRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nm: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub uid: Option<String>,
}

impl UnitRecord {
    /// Converts to a summary; a record without an `id` cannot be referenced
    /// and yields `None`.
    pub(crate) fn into_summary(self) -> Option<UnitSummary> {
        Some(UnitSummary {
            id: self.id?,
            name: self.nm.unwrap_or_default(),
            unique_id: self.uid.filter(|uid| !uid.is_empty()),
        })
    }
}

/// Unique ids come back as strings from most deployments and as bare numbers
/// from some older ones.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
