//! Per-call entry points that log in, run one search, and drop the session.

use serde_json::{json, Value};

use crate::client::TelemetryClient;
use crate::outcome::Lookup;
use crate::types::{Position, UnitSummary};

/// What to store as a vehicle's device id after its serial was edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceLink {
    /// The serial resolved; store this id.
    Linked(i64),
    /// The serial was removed; clear the stored id.
    Cleared,
    /// The serial did not resolve; keep whatever id is stored.
    Unchanged,
}

/// Answer for a vehicle-location request, with the HTTP status the host
/// application reports it under.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationReply {
    Located(Position),
    NoDevice,
    Unavailable,
}

impl LocationReply {
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            LocationReply::Located(_) => 200,
            LocationReply::NoDevice => 404,
            LocationReply::Unavailable => 503,
        }
    }

    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            LocationReply::Located(position) => json!(position),
            LocationReply::NoDevice => json!({ "error": "No device id set" }),
            LocationReply::Unavailable => json!({ "error": "Could not fetch location" }),
        }
    }
}

impl TelemetryClient {
    /// Logs in and returns the last position of `device_id`.
    pub async fn locate_device(&self, device_id: i64) -> Lookup<Position> {
        let session = match self.login().await {
            Ok(session) => session,
            Err(e) => return e.into(),
        };
        self.resolve_location(&session, device_id).await
    }

    /// Logs in and resolves a hardware serial to a unit id.
    ///
    /// A blank serial short-circuits to [`Lookup::NotFound`] before login.
    pub async fn find_device_id(&self, serial: &str) -> Lookup<i64> {
        if serial.trim().is_empty() {
            return Lookup::NotFound;
        }
        let session = match self.login().await {
            Ok(session) => session,
            Err(e) => return e.into(),
        };
        self.resolve_device_id_by_hardware_serial(&session, serial)
            .await
    }

    /// Logs in and lists the whole fleet.
    pub async fn list_all_units(&self) -> Lookup<Vec<UnitSummary>> {
        let session = match self.login().await {
            Ok(session) => session,
            Err(e) => return e.into(),
        };
        self.list_units(&session).await
    }

    /// Decides the device id to store for a vehicle whose serial is `serial`.
    pub async fn link_device(&self, serial: Option<&str>) -> DeviceLink {
        let Some(serial) = serial.map(str::trim).filter(|s| !s.is_empty()) else {
            return DeviceLink::Cleared;
        };
        match self.find_device_id(serial).await {
            Lookup::Found(id) => DeviceLink::Linked(id),
            other => {
                tracing::warn!(
                    serial,
                    outcome = ?other,
                    "could not resolve device id for serial; keeping stored id"
                );
                DeviceLink::Unchanged
            }
        }
    }

    /// Builds the location answer for a vehicle whose stored device id is
    /// `device_id` (as kept by the host application, i.e. a string).
    pub async fn location_reply(&self, device_id: Option<&str>) -> LocationReply {
        let Some(raw) = device_id.map(str::trim).filter(|s| !s.is_empty()) else {
            return LocationReply::NoDevice;
        };
        let Ok(id) = raw.parse::<i64>() else {
            tracing::warn!(device_id = raw, "stored device id is not numeric");
            return LocationReply::Unavailable;
        };
        match self.locate_device(id).await {
            Lookup::Found(position) => LocationReply::Located(position),
            _ => LocationReply::Unavailable,
        }
    }
}
