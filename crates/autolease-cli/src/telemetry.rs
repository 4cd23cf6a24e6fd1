//! Telemetry command handlers.
//!
//! Absent data is reported on stdout and is not an error; only a client that
//! cannot be built fails the command.

use autolease_core::AppConfig;
use autolease_telemetry::{LocationReply, Lookup, TelemetryClient, UnitSummary};

fn build_client(config: &AppConfig) -> anyhow::Result<TelemetryClient> {
    TelemetryClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build telemetry client: {e}"))
}

/// Prints the last known position of `device_id`.
///
/// # Errors
///
/// Returns an error if the telemetry client cannot be constructed.
pub(crate) async fn run_locate(
    config: &AppConfig,
    device_id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let reply = client.location_reply(Some(device_id)).await;

    if json {
        println!("{} {}", reply.status(), reply.body());
        return Ok(());
    }

    match reply {
        LocationReply::Located(position) => println!(
            "unit {device_id}: lat {:.6}, lon {:.6}",
            position.latitude, position.longitude
        ),
        LocationReply::NoDevice => println!("no device id given"),
        LocationReply::Unavailable => println!("could not fetch location for unit {device_id}"),
    }
    Ok(())
}

/// Prints the unit id registered for a hardware serial.
///
/// # Errors
///
/// Returns an error if the telemetry client cannot be constructed.
pub(crate) async fn run_resolve_serial(config: &AppConfig, serial: &str) -> anyhow::Result<()> {
    let client = build_client(config)?;
    match client.find_device_id(serial).await {
        Lookup::Found(id) => println!("{serial} -> {id}"),
        other => println!("{serial}: {}", describe_absence(&other)),
    }
    Ok(())
}

/// Prints the fleet inventory as an ID / UNIQUE ID / NAME table.
///
/// # Errors
///
/// Returns an error if the telemetry client cannot be constructed.
pub(crate) async fn run_units(config: &AppConfig) -> anyhow::Result<()> {
    let client = build_client(config)?;
    match client.list_all_units().await {
        Lookup::Found(units) if units.is_empty() => println!("no units found"),
        Lookup::Found(units) => print!("{}", format_units(&units)),
        other => println!("units: {}", describe_absence(&other)),
    }
    Ok(())
}

pub(crate) fn format_units(units: &[UnitSummary]) -> String {
    let mut out = format!("{:<12}{:<22}NAME\n", "ID", "UNIQUE ID");
    for unit in units {
        out.push_str(&format!(
            "{:<12}{:<22}{}\n",
            unit.id,
            unit.unique_id.as_deref().unwrap_or("\u{2014}"),
            unit.name
        ));
    }
    out
}

pub(crate) fn describe_absence<T>(lookup: &Lookup<T>) -> &'static str {
    match lookup {
        Lookup::Found(_) => "found",
        Lookup::NotFound => "not found",
        Lookup::ConfigurationMissing => "WIALON_TOKEN is not set",
        Lookup::AuthenticationFailed => "provider rejected the token",
        Lookup::NetworkUnavailable => "provider unreachable",
    }
}
