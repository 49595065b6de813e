//! Live telemetry command handlers.

use std::sync::Arc;

use suraksha_core::view::ListFilter;
use suraksha_core::{DeviceStatus, Monitor, Telemetry};
use tabled::Tabled;

use crate::cli::{GlobalOpts, LiveArgs, LiveCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Pole")]
    pole: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Temp")]
    temperature: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Voltage")]
    voltage: String,
    #[tabled(rename = "Vibration")]
    vibration: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl ReadingRow {
    fn new(t: &Arc<Telemetry>, painter: Painter) -> Self {
        Self {
            pole: t.pole_id.clone(),
            location: t.location.clone(),
            status: painter.status(t.status.as_ref()),
            battery: t.battery.to_string(),
            temperature: format!("{:.1}°C", t.temperature_c),
            current: format!("{:.1} A", t.current_a),
            voltage: format!("{:.0} V", t.voltage_v),
            vibration: format!("{:.2} g", t.vibration_g),
            updated: t.last_update.clone(),
        }
    }
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Pole")]
    pole: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Alert")]
    kind: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "AI")]
    confidence: String,
}

impl AlertRow {
    fn new(t: &Arc<Telemetry>, painter: Painter) -> Self {
        let alert = t.alert.as_ref();
        Self {
            pole: t.pole_id.clone(),
            status: painter.status(t.status.as_ref()),
            kind: alert.map_or_else(|| "-".into(), |a| a.kind.clone()),
            details: alert.map_or_else(|| "-".into(), |a| a.details.clone()),
            confidence: alert
                .and_then(|a| a.ai_confidence)
                .map_or_else(|| "-".into(), |c| c.to_string()),
        }
    }
}

fn detail(t: &Arc<Telemetry>) -> String {
    let mut lines = vec![
        format!("ID:          {}", t.id),
        format!("Pole:        {}", t.pole_id),
        format!("Location:    {}", t.location),
        format!("Coordinates: {}", t.coordinates),
        format!("Status:      {}", t.status),
        format!("Updated:     {}", t.last_update),
        format!(
            "Battery:     {}{}",
            t.battery,
            if t.solar_charging { " (solar charging)" } else { "" }
        ),
        format!("Temperature: {:.1}°C", t.temperature_c),
        format!("Current:     {:.1} A", t.current_a),
        format!("Voltage:     {:.0} V", t.voltage_v),
        format!("Vibration:   {:.2} g", t.vibration_g),
    ];
    if let Some(alert) = &t.alert {
        lines.push(format!("Alert:       {}", alert.kind));
        lines.push(format!("Details:     {}", alert.details));
        if let Some(confidence) = alert.ai_confidence {
            lines.push(format!("AI Conf.:    {confidence}"));
        }
    }
    lines.join("\n")
}

fn needs_attention(t: &Telemetry) -> bool {
    matches!(t.status, DeviceStatus::Critical | DeviceStatus::Warning)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(monitor: &Monitor, args: LiveArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        LiveCommand::List(list) => {
            let filter: ListFilter<DeviceStatus> = util::list_filter(&list)?;
            let snap = filter.apply(&monitor.telemetry_snapshot());
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "readings");
            }
            let out = output::render_list(
                &format,
                &snap,
                |t| ReadingRow::new(t, painter),
                |t| t.pole_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LiveCommand::Get { pole } => {
            let t = monitor.telemetry_reading(&pole)?;
            let out = output::render_single(&format, &t, detail, |t| t.pole_id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LiveCommand::Alerts => {
            let snap: Vec<Arc<Telemetry>> = monitor
                .telemetry_snapshot()
                .iter()
                .filter(|t| needs_attention(t))
                .cloned()
                .collect();
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "alerts");
            }
            let out = output::render_list(
                &format,
                &snap,
                |t| AlertRow::new(t, painter),
                |t| t.pole_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
