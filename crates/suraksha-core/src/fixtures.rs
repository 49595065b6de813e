// ── Built-in deployment data ──
//
// The pilot deployment's records. These seed the store until a real
// telemetry source is attached; every constructor returns records in
// display order.

use chrono::NaiveDate;

use crate::geo::Coordinates;
use crate::model::{
    AccountStatus, Alert, AlertLevel, Analytics, CitizenReport, Device, DeviceStatus,
    FailurePrediction, FieldJob, Incident, IncidentAction, IncidentActionKind, IncidentStatus,
    IncidentType, Integration, IntegrationStatus, JobStatus, ModelMetrics, Percent, RecordId,
    ReportStatus, ReportTemplate, RiskBand, RiskDistribution, RiskFactor, ScheduleStatus,
    ScheduledReport, Severity, Telemetry, TelemetryAlert, UserAccount, UserRole,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

// ── Device registry ─────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn device(
    id: &str,
    pole_id: &str,
    region: &str,
    location: &str,
    status: DeviceStatus,
    battery: u8,
    last_seen: &str,
    firmware: &str,
    last_message: &str,
    installed: NaiveDate,
) -> Device {
    Device {
        id: RecordId::from(id),
        pole_id: pole_id.into(),
        region: region.into(),
        location: location.into(),
        status,
        battery: Percent::new(battery),
        last_seen: last_seen.into(),
        firmware: firmware.into(),
        last_message: last_message.into(),
        installed,
    }
}

pub fn devices() -> Vec<Device> {
    vec![
        device(
            "1", "KL-001-TVM", "Thiruvananthapuram", "Medical College Junction",
            DeviceStatus::Healthy, 89, "2 min ago", "v2.1.4", "Normal operation",
            date(2024, 1, 15),
        ),
        device(
            "2", "KL-002-KCH", "Kochi", "MG Road",
            DeviceStatus::Warning, 72, "1 min ago", "v2.1.3", "Low battery warning",
            date(2024, 1, 20),
        ),
        device(
            "3", "KL-003-KCH", "Kochi", "Ernakulam South",
            DeviceStatus::Critical, 45, "Just now", "v2.1.4", "Conductor break detected",
            date(2024, 2, 1),
        ),
        device(
            "4", "KL-004-KLM", "Kozhikode", "Calicut Beach Road",
            DeviceStatus::Offline, 15, "5 min ago", "v2.0.8", "Connection timeout",
            date(2023, 12, 10),
        ),
        device(
            "5", "KL-005-TSR", "Thrissur", "Swaraj Round",
            DeviceStatus::Healthy, 91, "3 min ago", "v2.1.4", "Normal operation",
            date(2024, 2, 15),
        ),
    ]
}

// ── Incidents ───────────────────────────────────────────────────────

fn action(id: &str, kind: IncidentActionKind, user: &str, timestamp: &str, details: &str) -> IncidentAction {
    IncidentAction {
        id: RecordId::from(id),
        kind,
        user: user.into(),
        timestamp: timestamp.into(),
        details: details.into(),
    }
}

pub fn incidents() -> Vec<Incident> {
    vec![
        Incident {
            id: RecordId::from("INC-2024-001"),
            pole_id: "KL-003-KCH".into(),
            kind: IncidentType::ConductorBreak,
            severity: Severity::Critical,
            status: IncidentStatus::Investigating,
            location: "MG Road, Kochi - Ernakulam".into(),
            ai_confidence: Some(Percent::new(94)),
            reported_by: "AI Detection System".into(),
            assigned_to: Some("Rajesh Kumar".into()),
            created_at: "2024-01-15 14:23:45".into(),
            updated_at: "2024-01-15 14:35:12".into(),
            evidence: strings(&["voltage_graph.png", "vibration_data.csv", "field_photo_1.jpg"]),
            actions: vec![
                action(
                    "1", IncidentActionKind::Acknowledged, "Control Room", "14:24:15",
                    "Incident acknowledged, dispatching field team",
                ),
                action(
                    "2", IncidentActionKind::Assigned, "Supervisor", "14:28:30",
                    "Assigned to Rajesh Kumar (Team Lead)",
                ),
                action(
                    "3", IncidentActionKind::Commented, "Rajesh Kumar", "14:35:12",
                    "En route to location, ETA 15 minutes",
                ),
            ],
        },
        Incident {
            id: RecordId::from("INC-2024-002"),
            pole_id: "KL-007-KLM".into(),
            kind: IncidentType::EquipmentFailure,
            severity: Severity::High,
            status: IncidentStatus::Assigned,
            location: "Calicut Beach Road, Kozhikode".into(),
            ai_confidence: None,
            reported_by: "Monitoring System".into(),
            assigned_to: Some("Sanjay Nair".into()),
            created_at: "2024-01-15 12:15:22".into(),
            updated_at: "2024-01-15 13:45:18".into(),
            evidence: strings(&["battery_status.json", "solar_panel_image.jpg"]),
            actions: vec![
                action(
                    "1", IncidentActionKind::Acknowledged, "Control Room", "12:16:00",
                    "Battery failure confirmed",
                ),
                action(
                    "2", IncidentActionKind::Assigned, "Supervisor", "12:45:30",
                    "Assigned to Sanjay for battery replacement",
                ),
            ],
        },
        Incident {
            id: RecordId::from("INC-2024-003"),
            pole_id: "KL-001-TVM".into(),
            kind: IncidentType::CitizenReport,
            severity: Severity::Medium,
            status: IncidentStatus::New,
            location: "Medical College Junction, Thiruvananthapuram".into(),
            ai_confidence: None,
            reported_by: "Citizen: Priya Nair".into(),
            assigned_to: None,
            created_at: "2024-01-15 19:30:45".into(),
            updated_at: "2024-01-15 19:30:45".into(),
            evidence: strings(&["citizen_photo_1.jpg", "citizen_photo_2.jpg"]),
            actions: Vec::new(),
        },
    ]
}

// ── Field operations ────────────────────────────────────────────────

pub fn field_jobs() -> Vec<FieldJob> {
    vec![
        FieldJob {
            id: RecordId::from("JOB001"),
            pole_id: "KL-003-KCH".into(),
            title: "Conductor Break - Emergency Repair".into(),
            priority: Severity::Critical,
            status: JobStatus::Assigned,
            location: "MG Road, Kochi".into(),
            coordinates: Coordinates { lat: 9.9312, lng: 76.2673 },
            distance_km: 2.3,
            eta_minutes: 15,
            assigned_to: "Rajesh Kumar".into(),
            created: "5 min ago".into(),
            equipment: ["Insulation tester", "Cable cutter", "Safety harness"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
        FieldJob {
            id: RecordId::from("JOB002"),
            pole_id: "KL-007-KLM".into(),
            title: "Battery Replacement Required".into(),
            priority: Severity::High,
            status: JobStatus::InProgress,
            location: "Calicut Beach Road, Kozhikode".into(),
            coordinates: Coordinates { lat: 11.2588, lng: 75.7804 },
            distance_km: 0.8,
            eta_minutes: 5,
            assigned_to: "Sanjay Nair".into(),
            created: "25 min ago".into(),
            equipment: ["12V Battery", "Multimeter", "Screwdriver set"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
        FieldJob {
            id: RecordId::from("JOB003"),
            pole_id: "KL-012-TSR".into(),
            title: "Vibration Sensor Calibration".into(),
            priority: Severity::Medium,
            status: JobStatus::Pending,
            location: "Swaraj Round, Thrissur".into(),
            coordinates: Coordinates { lat: 10.5276, lng: 76.2144 },
            distance_km: 5.7,
            eta_minutes: 25,
            assigned_to: "Amit Singh".into(),
            created: "1 hour ago".into(),
            equipment: ["Calibration kit", "Torque wrench", "Level meter"]
                .into_iter()
                .map(String::from)
                .collect(),
        },
    ]
}

// ── Citizen portal ──────────────────────────────────────────────────

pub fn citizen_reports() -> Vec<CitizenReport> {
    vec![
        CitizenReport {
            id: RecordId::from("CR-2024-001"),
            title: "Sparking electrical pole".into(),
            location: "Medical College Junction, TVM".into(),
            description: None,
            status: ReportStatus::Resolved,
            priority: Severity::High,
            submitted: date(2024, 1, 10),
            photos: strings(&["photo1.jpg", "photo2.jpg"]),
            response: Some(
                "Issue investigated and resolved. Faulty insulator replaced. Thank you for reporting!"
                    .into(),
            ),
        },
        CitizenReport {
            id: RecordId::from("CR-2024-002"),
            title: "Hanging wire near school".into(),
            location: "Government High School, Kochi".into(),
            description: None,
            status: ReportStatus::Investigating,
            priority: Severity::Critical,
            submitted: date(2024, 1, 14),
            photos: strings(&["photo3.jpg"]),
            response: None,
        },
        CitizenReport {
            id: RecordId::from("CR-2024-003"),
            title: "Damaged pole after storm".into(),
            location: "Beach Road, Kozhikode".into(),
            description: None,
            status: ReportStatus::UnderReview,
            priority: Severity::Medium,
            submitted: date(2024, 1, 15),
            photos: strings(&["photo4.jpg", "photo5.jpg"]),
            response: None,
        },
    ]
}

// ── Live telemetry ──────────────────────────────────────────────────

struct Reading {
    battery: u8,
    solar_charging: bool,
    temperature_c: f64,
    current_a: f64,
    voltage_v: f64,
    vibration_g: f64,
}

fn telemetry(
    id: &str,
    pole_id: &str,
    location: &str,
    (lat, lng): (f64, f64),
    status: DeviceStatus,
    last_update: &str,
    reading: Reading,
    alert: Option<TelemetryAlert>,
) -> Telemetry {
    Telemetry {
        id: RecordId::from(id),
        pole_id: pole_id.into(),
        location: location.into(),
        coordinates: Coordinates { lat, lng },
        status,
        last_update: last_update.into(),
        battery: Percent::new(reading.battery),
        solar_charging: reading.solar_charging,
        temperature_c: reading.temperature_c,
        current_a: reading.current_a,
        voltage_v: reading.voltage_v,
        vibration_g: reading.vibration_g,
        alert,
    }
}

fn alert(kind: &str, details: &str, ai_confidence: Option<u8>) -> Option<TelemetryAlert> {
    Some(TelemetryAlert {
        kind: kind.into(),
        details: details.into(),
        ai_confidence: ai_confidence.map(Percent::new),
    })
}

#[allow(clippy::too_many_lines)]
pub fn telemetry_readings() -> Vec<Telemetry> {
    vec![
        telemetry(
            "KL-001", "KL-001-TVM", "Thiruvananthapuram - Medical College Junction",
            (8.5241, 76.9366), DeviceStatus::Healthy, "1 min ago",
            Reading { battery: 89, solar_charging: true, temperature_c: 28.5, current_a: 12.4, voltage_v: 230.2, vibration_g: 0.02 },
            None,
        ),
        telemetry(
            "KL-003", "KL-003-KCH", "Kochi - MG Road",
            (9.9312, 76.2673), DeviceStatus::Critical, "Just now",
            Reading { battery: 67, solar_charging: false, temperature_c: 31.2, current_a: 0.1, voltage_v: 45.3, vibration_g: 2.8 },
            alert(
                "Conductor Break",
                "Sudden voltage drop and high vibration detected. Possible conductor snap at height 4.2m.",
                Some(94),
            ),
        ),
        telemetry(
            "KL-007", "KL-007-KLM", "Kozhikode - Calicut Beach Road",
            (11.2588, 75.7804), DeviceStatus::Warning, "3 min ago",
            Reading { battery: 23, solar_charging: false, temperature_c: 34.7, current_a: 11.8, voltage_v: 218.9, vibration_g: 0.45 },
            alert(
                "Low Battery",
                "Battery level critically low. Solar panel may be obstructed or damaged.",
                None,
            ),
        ),
        telemetry(
            "KL-012", "KL-012-TSR", "Thrissur - Swaraj Round",
            (10.5276, 76.2144), DeviceStatus::Warning, "5 min ago",
            Reading { battery: 78, solar_charging: true, temperature_c: 29.1, current_a: 13.2, voltage_v: 235.7, vibration_g: 0.8 },
            alert(
                "Abnormal Vibration",
                "Elevated vibration levels detected. Possible loose connection or wind damage.",
                None,
            ),
        ),
        telemetry(
            "KL-018", "KL-018-ALP", "Alappuzha - Lighthouse",
            (9.4981, 76.3388), DeviceStatus::Healthy, "2 min ago",
            Reading { battery: 82, solar_charging: true, temperature_c: 27.9, current_a: 12.9, voltage_v: 229.8, vibration_g: 0.05 },
            None,
        ),
        telemetry(
            "KL-021", "KL-021-KNR", "Kannur - Payyambalam Beach",
            (11.8745, 75.3704), DeviceStatus::Offline, "10 min ago",
            Reading { battery: 0, solar_charging: false, temperature_c: 0.0, current_a: 0.0, voltage_v: 0.0, vibration_g: 0.0 },
            None,
        ),
        telemetry(
            "KL-025", "KL-025-PTA", "Pathanamthitta - Sabarimala Road",
            (9.2646, 76.7832), DeviceStatus::Healthy, "4 min ago",
            Reading { battery: 91, solar_charging: true, temperature_c: 26.7, current_a: 13.5, voltage_v: 232.1, vibration_g: 0.03 },
            None,
        ),
        telemetry(
            "KL-030", "KL-030-KTM", "Kottayam - Kumarakom",
            (9.6174, 76.4310), DeviceStatus::Warning, "6 min ago",
            Reading { battery: 56, solar_charging: false, temperature_c: 32.1, current_a: 10.2, voltage_v: 220.5, vibration_g: 1.2 },
            alert(
                "High Temperature",
                "Temperature exceeds safe threshold. Check cooling system.",
                None,
            ),
        ),
    ]
}

// ── Dashboard and reports ───────────────────────────────────────────

pub fn alerts() -> Vec<Alert> {
    let alert = |id: &str, level, message: &str, time: &str, confidence| Alert {
        id: RecordId::from(id),
        level,
        message: message.into(),
        time: time.into(),
        confidence: Percent::new(confidence),
    };
    vec![
        alert("1", AlertLevel::Critical, "Conductor break detected at Pole KL-003", "2 min ago", 94),
        alert("2", AlertLevel::Warning, "Low battery warning at Pole KL-007", "5 min ago", 87),
        alert("3", AlertLevel::Warning, "Abnormal vibration at Pole KL-012", "8 min ago", 76),
    ]
}

pub fn report_templates() -> Vec<ReportTemplate> {
    let template = |id: &str, name: &str, description: &str, frequency: &str, last: &str| {
        ReportTemplate {
            id: RecordId::from(id),
            name: name.into(),
            description: description.into(),
            frequency: frequency.into(),
            last_generated: last.into(),
        }
    };
    vec![
        template(
            "incident_summary", "Incident Summary Report",
            "Comprehensive overview of all incidents, response times, and resolution status",
            "Daily/Weekly/Monthly", "2024-01-15 09:30 AM",
        ),
        template(
            "device_uptime", "Device Uptime & Performance",
            "System availability, battery levels, and device health metrics",
            "Weekly/Monthly", "2024-01-14 06:00 AM",
        ),
        template(
            "predictive_analysis", "Predictive Maintenance Report",
            "AI-powered predictions for equipment failures and maintenance schedules",
            "Weekly", "2024-01-13 08:15 AM",
        ),
        template(
            "field_operations", "Field Operations Summary",
            "Team performance, job completion rates, and response metrics",
            "Weekly/Monthly", "2024-01-15 07:45 AM",
        ),
    ]
}

pub fn scheduled_reports() -> Vec<ScheduledReport> {
    let scheduled = |id: &str, name: &str, kind: &str, schedule: &str, recipients: &[&str]| {
        ScheduledReport {
            id: RecordId::from(id),
            name: name.into(),
            kind: kind.into(),
            schedule: schedule.into(),
            recipients: strings(recipients),
            status: ScheduleStatus::Active,
        }
    };
    vec![
        scheduled(
            "SCH001", "Weekly Incident Digest", "Incident Summary", "Every Monday 8:00 AM",
            &["admin@ksebl.in", "safety@ksebl.in"],
        ),
        scheduled(
            "SCH002", "Monthly Performance Review", "Device Performance", "1st of every month",
            &["management@ksebl.in", "operations@ksebl.in"],
        ),
        scheduled(
            "SCH003", "Daily Critical Alerts", "Emergency Summary", "Daily 6:00 AM & 6:00 PM",
            &["control.room@ksebl.in"],
        ),
    ]
}

// ── Predictive analytics ────────────────────────────────────────────

pub fn analytics() -> Analytics {
    let factor = |name: &str, impact, trend| RiskFactor {
        factor: name.into(),
        impact: Percent::new(impact),
        trend,
    };
    let prediction =
        |pole: &str, location: &str, risk, window: &str, confidence, reasons: &[&str]| {
            FailurePrediction {
                id: RecordId::from(pole),
                pole_id: pole.into(),
                location: location.into(),
                risk_score: Percent::new(risk),
                predicted_failure: window.into(),
                confidence: Percent::new(confidence),
                reasons: strings(reasons),
            }
        };

    Analytics {
        metrics: ModelMetrics {
            accuracy: 94.2,
            precision: 91.8,
            recall: 96.5,
            false_positive_rate: 2.3,
            last_training: date(2024, 1, 15),
            training_data_points: 125_000,
        },
        distribution: RiskDistribution {
            low: 847,
            medium: 312,
            high: 88,
        },
        risk_factors: vec![
            factor("Weather Patterns", 85, RiskBand::High),
            factor("Equipment Age", 72, RiskBand::Medium),
            factor("Maintenance History", 68, RiskBand::Low),
            factor("Vibration Levels", 91, RiskBand::High),
            factor("Temperature Stress", 78, RiskBand::Medium),
        ],
        predictions: vec![
            prediction(
                "KL-008-KLM", "Kozhikode - Beach Road", 87, "3-5 days", 92,
                &["High vibration detected", "Weather forecast: heavy winds", "Equipment age > 15 years"],
            ),
            prediction(
                "KL-015-TSR", "Thrissur - Cultural Center", 74, "1-2 weeks", 78,
                &["Irregular voltage patterns", "Recent maintenance overdue", "Monsoon season approaching"],
            ),
            prediction(
                "KL-023-EKM", "Ernakulam - Marine Drive", 69, "2-3 weeks", 71,
                &["Salt water corrosion risk", "High current loads", "Aging insulation components"],
            ),
        ],
    }
}

// ── Accounts and integrations ───────────────────────────────────────

pub fn users() -> Vec<UserAccount> {
    let user = |id: &str, name: &str, role, email: &str, status, last_login: &str| UserAccount {
        id: RecordId::from(id),
        name: name.into(),
        role,
        email: email.into(),
        status,
        last_login: last_login.into(),
    };
    vec![
        user("1", "Rajesh Kumar", UserRole::FieldTechnician, "rajesh@ksebl.in", AccountStatus::Active, "2 hours ago"),
        user("2", "Priya Nair", UserRole::SystemAdministrator, "priya@ksebl.in", AccountStatus::Active, "1 hour ago"),
        user("3", "Sanjay Singh", UserRole::Supervisor, "sanjay@ksebl.in", AccountStatus::Active, "30 min ago"),
        user("4", "Dr. Amit Sharma", UserRole::SafetyInspector, "amit@ksebl.in", AccountStatus::Inactive, "2 days ago"),
    ]
}

pub fn integrations() -> Vec<Integration> {
    let integration = |id: &str, name: &str, description: &str, last_sync: &str| Integration {
        id: RecordId::from(id),
        name: name.into(),
        description: description.into(),
        status: IntegrationStatus::Connected,
        last_sync: last_sync.into(),
    };
    vec![
        integration("ksebl_portal", "KSEBL Portal Integration", "Sync with main KSEBL management system", "5 min ago"),
        integration("whatsapp", "WhatsApp Business API", "Send alerts and notifications via WhatsApp", "1 min ago"),
        integration("google_maps", "Google Maps Integration", "Navigation and location services for field teams", "Live"),
        integration("weather", "Weather API", "Weather data for predictive risk analysis", "10 min ago"),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn device_pole_ids_are_unique() {
        let devices = devices();
        let ids: HashSet<_> = devices.iter().map(|d| d.pole_id.as_str()).collect();
        assert_eq!(ids.len(), devices.len());
    }

    #[test]
    fn job_coordinates_are_valid() {
        assert!(field_jobs().iter().all(|j| j.coordinates.is_valid()));
        assert!(telemetry_readings().iter().all(|t| t.coordinates.is_valid()));
    }

    #[test]
    fn dates_parse() {
        assert!(devices().iter().all(|d| d.installed != NaiveDate::default()));
        assert!(citizen_reports().iter().all(|r| r.submitted != NaiveDate::default()));
    }

    #[test]
    fn fixture_sizes() {
        assert_eq!(devices().len(), 5);
        assert_eq!(incidents().len(), 3);
        assert_eq!(field_jobs().len(), 3);
        assert_eq!(citizen_reports().len(), 3);
        assert_eq!(telemetry_readings().len(), 8);
        assert_eq!(alerts().len(), 3);
        assert_eq!(report_templates().len(), 4);
        assert_eq!(scheduled_reports().len(), 3);
        assert_eq!(users().len(), 4);
        assert_eq!(integrations().len(), 4);
    }

    #[test]
    fn analytics_predictions_are_ranked_by_risk() {
        let analytics = analytics();
        let scores: Vec<u8> = analytics.predictions.iter().map(|p| p.risk_score.get()).collect();
        assert_eq!(scores, vec![87, 74, 69]);
        assert!(analytics.predictions[0].is_priority());
        assert_eq!(analytics.predictions[2].band(), RiskBand::Medium);
        assert_eq!(analytics.distribution.total(), 1247);
    }
}
