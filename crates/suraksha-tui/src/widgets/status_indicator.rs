//! Status indicators: the tone of every status vocabulary plus the
//! ●/◐/○/◉ device dots.

use ratatui::text::Span;

use suraksha_core::{
    AccountStatus, AlertLevel, DeviceStatus, IncidentStatus, IntegrationStatus, JobStatus,
    ReportStatus, RiskBand, ScheduleStatus, Severity,
};

use crate::theme::Tone;

pub fn device_tone(status: DeviceStatus) -> Tone {
    match status {
        DeviceStatus::Healthy => Tone::Safe,
        DeviceStatus::Warning => Tone::Caution,
        DeviceStatus::Critical => Tone::Danger,
        DeviceStatus::Offline => Tone::Idle,
    }
}

/// Status dot character without styling.
pub fn device_char(status: DeviceStatus) -> &'static str {
    match status {
        DeviceStatus::Healthy => "●",
        DeviceStatus::Warning => "◐",
        DeviceStatus::Critical => "◉",
        DeviceStatus::Offline => "○",
    }
}

/// Styled dot and label, e.g. `● healthy`.
pub fn device_span(status: DeviceStatus) -> Span<'static> {
    Span::styled(
        format!("{} {status}", device_char(status)),
        device_tone(status).style(),
    )
}

pub fn severity_tone(severity: Severity) -> Tone {
    match severity {
        Severity::Critical => Tone::Danger,
        Severity::High => Tone::Alert,
        Severity::Medium => Tone::Caution,
        Severity::Low => Tone::Safe,
    }
}

pub fn incident_tone(status: IncidentStatus) -> Tone {
    match status {
        IncidentStatus::New => Tone::Danger,
        IncidentStatus::Acknowledged | IncidentStatus::Investigating => Tone::Caution,
        IncidentStatus::Assigned | IncidentStatus::InProgress => Tone::Signal,
        IncidentStatus::Resolved | IncidentStatus::Closed => Tone::Safe,
    }
}

pub fn job_tone(status: JobStatus) -> Tone {
    match status {
        JobStatus::Assigned => Tone::Signal,
        JobStatus::InProgress => Tone::Caution,
        JobStatus::Completed => Tone::Safe,
        JobStatus::Pending => Tone::Idle,
    }
}

pub fn report_tone(status: ReportStatus) -> Tone {
    match status {
        ReportStatus::Submitted => Tone::Signal,
        ReportStatus::UnderReview | ReportStatus::Investigating => Tone::Caution,
        ReportStatus::Resolved => Tone::Safe,
    }
}

pub fn alert_tone(level: AlertLevel) -> Tone {
    match level {
        AlertLevel::Critical => Tone::Danger,
        AlertLevel::Warning => Tone::Caution,
    }
}

pub fn schedule_tone(status: ScheduleStatus) -> Tone {
    match status {
        ScheduleStatus::Active => Tone::Safe,
        ScheduleStatus::Paused => Tone::Idle,
    }
}

pub fn risk_tone(band: RiskBand) -> Tone {
    match band {
        RiskBand::Low => Tone::Safe,
        RiskBand::Medium => Tone::Caution,
        RiskBand::High => Tone::Danger,
    }
}

pub fn account_tone(status: AccountStatus) -> Tone {
    match status {
        AccountStatus::Active => Tone::Safe,
        AccountStatus::Inactive => Tone::Idle,
    }
}

/// `● connected` / `○ disconnected`.
pub fn integration_span(status: IntegrationStatus) -> Span<'static> {
    match status {
        IntegrationStatus::Connected => Span::styled(format!("● {status}"), Tone::Safe.style()),
        IntegrationStatus::Disconnected => {
            Span::styled(format!("○ {status}"), Tone::Danger.style())
        }
    }
}

/// `●` for an enabled toggle, `○` for a disabled one.
pub fn toggle_span(enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled("● on ", Tone::Safe.style())
    } else {
        Span::styled("○ off", Tone::Idle.style())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bands_escalate() {
        assert_eq!(risk_tone(RiskBand::Low), Tone::Safe);
        assert_eq!(risk_tone(RiskBand::Medium), Tone::Caution);
        assert_eq!(risk_tone(RiskBand::High), Tone::Danger);
    }

    #[test]
    fn offline_devices_read_as_idle() {
        assert_eq!(device_tone(DeviceStatus::Offline), Tone::Idle);
        assert_eq!(device_span(DeviceStatus::Critical).content, "◉ critical");
    }
}
