//! Client for the vehicle-tracking provider's `ajax.html` JSON API.
//!
//! Every public lookup is best-effort: transport, authentication, and shape
//! failures are collapsed into [`Lookup`] / [`AuthError`] variants instead of
//! surfacing as errors.

pub mod client;
pub mod error;
mod locate;
pub mod outcome;
mod search;
pub mod types;

pub use client::TelemetryClient;
pub use error::TelemetryError;
pub use locate::{DeviceLink, LocationReply};
pub use outcome::{AuthError, Lookup};
pub use types::{Position, Session, UnitSummary};
