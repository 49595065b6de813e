//! Command dispatch: bridges CLI args -> monitor queries and commands -> output formatting.

pub mod alerts;
pub mod analytics;
pub mod citizen;
pub mod config_cmd;
pub mod devices;
pub mod incidents;
pub mod jobs;
pub mod live;
pub mod reports;
pub mod team;
pub mod util;

use suraksha_core::{Locator, Monitor};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a data command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    monitor: &Monitor,
    global: &GlobalOpts,
    locator: &dyn Locator,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(monitor, args, global),
        Command::Live(args) => live::handle(monitor, args, global),
        Command::Incidents(args) => incidents::handle(monitor, args, global).await,
        Command::Jobs(args) => jobs::handle(monitor, args, global),
        Command::Citizen(args) => citizen::handle(monitor, args, global, locator).await,
        Command::Alerts(args) => alerts::handle(monitor, args, global),
        Command::Reports(args) => reports::handle(monitor, args, global),
        Command::Analytics(args) => analytics::handle(monitor, args, global),
        Command::Users(args) => team::handle_users(monitor, args, global),
        Command::Integrations(args) => team::handle_integrations(monitor, args, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
