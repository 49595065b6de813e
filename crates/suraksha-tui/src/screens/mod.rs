//! Screen implementations, one per [`ScreenId`].

pub mod analytics;
pub mod citizen;
pub mod dashboard;
pub mod devices;
pub mod field_ops;
pub mod incidents;
pub mod live;
pub mod reports;
pub mod settings;

use std::path::Path;

use suraksha_config::Config;

use crate::component::Component;
use crate::screen::ScreenId;

/// Build every screen, in tab order.
pub fn create_screens(config: &Config, config_path: &Path) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Dashboard, Box::new(dashboard::DashboardScreen::new())),
        (ScreenId::Live, Box::new(live::LiveScreen::new())),
        (ScreenId::Devices, Box::new(devices::DevicesScreen::new())),
        (ScreenId::Incidents, Box::new(incidents::IncidentsScreen::new())),
        (ScreenId::FieldOps, Box::new(field_ops::FieldOpsScreen::new())),
        (
            ScreenId::Citizen,
            Box::new(citizen::CitizenScreen::new(config.locator())),
        ),
        (ScreenId::Reports, Box::new(reports::ReportsScreen::new())),
        (ScreenId::Analytics, Box::new(analytics::AnalyticsScreen::new())),
        (
            ScreenId::Settings,
            Box::new(settings::SettingsScreen::new(config.clone(), config_path)),
        ),
    ]
}
