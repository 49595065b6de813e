//! Dashboard alert command handlers.

use std::sync::Arc;

use suraksha_core::{Alert, Monitor};
use tabled::Tabled;

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

impl AlertRow {
    fn new(a: &Arc<Alert>, painter: Painter) -> Self {
        Self {
            id: a.id.to_string(),
            level: painter.status(a.level.as_ref()),
            message: a.message.clone(),
            time: a.time.clone(),
            confidence: a.confidence.to_string(),
        }
    }
}

pub fn handle(monitor: &Monitor, args: AlertsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        AlertsCommand::List => {
            let snap = monitor.alerts_snapshot();
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "alerts");
            }
            let out = output::render_list(
                &format,
                &snap,
                |a| AlertRow::new(a, painter),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
