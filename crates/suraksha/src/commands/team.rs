//! Operator account and integration listings.

use std::sync::Arc;

use suraksha_core::view::ListFilter;
use suraksha_core::{Integration, Monitor, UserAccount, UserRole};
use tabled::Tabled;

use crate::cli::{GlobalOpts, IntegrationsArgs, IntegrationsCommand, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last login")]
    last_login: String,
}

impl UserRow {
    fn new(u: &Arc<UserAccount>, painter: Painter) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            role: u.role.to_string(),
            email: u.email.clone(),
            status: painter.status(u.status.as_ref()),
            last_login: u.last_login.clone(),
        }
    }
}

#[derive(Tabled)]
struct IntegrationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last sync")]
    last_sync: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl IntegrationRow {
    fn new(i: &Arc<Integration>, painter: Painter) -> Self {
        Self {
            id: i.id.to_string(),
            name: i.name.clone(),
            status: painter.status(i.status.as_ref()),
            last_sync: i.last_sync.clone(),
            description: i.description.clone(),
        }
    }
}

pub fn handle_users(monitor: &Monitor, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        UsersCommand::List(list) => {
            let filter: ListFilter<UserRole> = util::list_filter(&list)?;
            let snap = filter.apply(&monitor.users_snapshot());
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "users");
            }
            let out = output::render_list(
                &format,
                &snap,
                |u| UserRow::new(u, painter),
                |u| u.email.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

pub fn handle_integrations(
    monitor: &Monitor,
    args: IntegrationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        IntegrationsCommand::List => {
            let snap = monitor.integrations_snapshot();
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "integrations");
            }
            let out = output::render_list(
                &format,
                &snap,
                |i| IntegrationRow::new(i, painter),
                |i| i.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
