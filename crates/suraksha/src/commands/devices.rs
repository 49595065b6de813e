//! Device command handlers.

use std::sync::Arc;

use serde::Serialize;
use suraksha_core::view::{ListFilter, tally};
use suraksha_core::{Device, DeviceStatus, Monitor};
use tabled::Tabled;

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Pole")]
    pole: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
}

impl DeviceRow {
    fn new(d: &Arc<Device>, painter: Painter) -> Self {
        Self {
            id: d.id.to_string(),
            pole: d.pole_id.clone(),
            region: d.region.clone(),
            location: d.location.clone(),
            status: painter.status(d.status.as_ref()),
            battery: d.battery.to_string(),
            last_seen: d.last_seen.clone(),
            firmware: d.firmware.clone(),
        }
    }
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Devices")]
    count: usize,
}

/// One line of `devices counts`; serializes as `{status, count}`.
#[derive(Serialize)]
struct StatusCount {
    status: DeviceStatus,
    count: usize,
}

fn detail(d: &Arc<Device>) -> String {
    let mut lines = vec![
        format!("ID:           {}", d.id),
        format!("Pole:         {}", d.pole_id),
        format!("Region:       {}", d.region),
        format!("Location:     {}", d.location),
        format!("Status:       {}", d.status),
        format!("Battery:      {}", d.battery),
        format!("Last Seen:    {}", d.last_seen),
        format!("Firmware:     {}", d.firmware),
        format!("Installed:    {}", d.installed),
        format!("Last Message: {}", d.last_message),
    ];
    if d.is_low_battery() {
        lines.push("Note:         battery low, schedule a replacement".into());
    }
    if !d.has_current_firmware() {
        lines.push("Note:         firmware update available".into());
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(monitor: &Monitor, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        DevicesCommand::List(list) => {
            let filter: ListFilter<DeviceStatus> = util::list_filter(&list)?;
            let all = monitor.devices_snapshot();
            let snap = filter.apply(&all);
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "devices");
            }
            let out = output::render_list(
                &format,
                &snap,
                |d| DeviceRow::new(d, painter),
                |d| d.pole_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let d = monitor.device(&device)?;
            let out = output::render_single(&format, &d, detail, |d| d.pole_id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Counts => {
            let counts: Vec<StatusCount> = tally(monitor.devices_snapshot().iter())
                .zero_filled()
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect();
            let out = output::render_list(
                &format,
                &counts,
                |c| CountRow {
                    status: painter.status(c.status.as_ref()),
                    count: c.count,
                },
                |c| format!("{}\t{}", c.status, c.count),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
