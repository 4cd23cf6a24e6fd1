//! Session-scoped searches: last position, serial lookup, fleet inventory.

use serde_json::json;

use crate::client::{decode, TelemetryClient, SVC_SEARCH_ITEM, SVC_SEARCH_ITEMS};
use crate::error::TelemetryError;
use crate::outcome::Lookup;
use crate::types::{
    Position, RawPosition, SearchItemResponse, SearchItemsResponse, Session, UnitSummary,
    FLAG_BASE, FLAG_LAST_MESSAGE,
};

impl TelemetryClient {
    /// Returns the last reported position of `device_id`.
    ///
    /// Reads `item.lmsg.pos` from a `core/search_item` response; a missing
    /// link anywhere in that chain is [`Lookup::NotFound`].
    pub async fn resolve_location(&self, session: &Session, device_id: i64) -> Lookup<Position> {
        match self.try_resolve_location(session, device_id).await {
            Ok(position) => Lookup::Found(position),
            Err(e) => {
                log_lookup_failure(&e, "resolve_location", &device_id.to_string());
                e.into()
            }
        }
    }

    async fn try_resolve_location(
        &self,
        session: &Session,
        device_id: i64,
    ) -> Result<Position, TelemetryError> {
        let params = json!({ "id": device_id, "flags": FLAG_LAST_MESSAGE });
        let url = self.build_url(SVC_SEARCH_ITEM, &params, Some(session.sid()));
        let body = self.request_json(&url, SVC_SEARCH_ITEM).await?;
        let response: SearchItemResponse = decode(body, SVC_SEARCH_ITEM)?;

        response
            .item
            .and_then(|item| item.lmsg)
            .and_then(|msg| msg.pos)
            .and_then(RawPosition::into_position)
            .ok_or_else(|| TelemetryError::NotFound {
                context: format!("no last position for unit {device_id}"),
            })
    }

    /// Resolves a hardware serial (IMEI) to the provider's unit id.
    ///
    /// Filters units by `sys_unique_id == serial`, sorted by name, and returns
    /// the first match carrying an id. A blank serial is [`Lookup::NotFound`] without a
    /// request.
    pub async fn resolve_device_id_by_hardware_serial(
        &self,
        session: &Session,
        serial: &str,
    ) -> Lookup<i64> {
        let serial = serial.trim();
        if serial.is_empty() {
            return Lookup::NotFound;
        }

        match self.search_units(session, "sys_unique_id", serial).await {
            Ok(units) => units
                .first()
                .map_or(Lookup::NotFound, |unit| Lookup::Found(unit.id)),
            Err(e) => {
                log_lookup_failure(&e, "resolve_device_id_by_hardware_serial", serial);
                e.into()
            }
        }
    }

    /// Lists every unit visible to the session, sorted by name.
    ///
    /// An empty fleet is `Found(vec![])`; only a response without an `items`
    /// key at all is [`Lookup::NotFound`].
    pub async fn list_units(&self, session: &Session) -> Lookup<Vec<UnitSummary>> {
        match self.search_units(session, "sys_name", "*").await {
            Ok(units) => Lookup::Found(units),
            Err(e) => {
                log_lookup_failure(&e, "list_units", "*");
                e.into()
            }
        }
    }

    async fn search_units(
        &self,
        session: &Session,
        prop_name: &str,
        mask: &str,
    ) -> Result<Vec<UnitSummary>, TelemetryError> {
        let params = json!({
            "spec": {
                "itemsType": "avl_unit",
                "propName": prop_name,
                "propValueMask": mask,
                "sortType": "sys_name"
            },
            "force": 1,
            "flags": FLAG_BASE,
            "from": 0,
            "to": 0
        });
        let url = self.build_url(SVC_SEARCH_ITEMS, &params, Some(session.sid()));
        let body = self.request_json(&url, SVC_SEARCH_ITEMS).await?;

        if body.get("items").map_or(true, serde_json::Value::is_null) {
            return Err(TelemetryError::NotFound {
                context: format!("no items for {prop_name}={mask}"),
            });
        }

        let response: SearchItemsResponse = decode(body, SVC_SEARCH_ITEMS)?;
        let units = response
            .items
            .into_iter()
            .filter_map(|record| {
                let summary = record.into_summary();
                if summary.is_none() {
                    tracing::warn!(prop_name, mask, "skipping unit record without an id");
                }
                summary
            })
            .collect();
        Ok(units)
    }
}

fn log_lookup_failure(err: &TelemetryError, operation: &str, subject: &str) {
    match err {
        TelemetryError::NotFound { context } => {
            tracing::debug!(
                operation,
                subject,
                context = %context,
                "telemetry lookup found nothing"
            );
        }
        other => {
            tracing::warn!(operation, subject, error = %other, "telemetry lookup failed");
        }
    }
}
