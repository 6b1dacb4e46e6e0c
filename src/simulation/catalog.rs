use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::alert::{Alert, AlertStatus, Severity};
use crate::simulation::random::RandomSource;

pub const VEHICLE_MODELS: [&str; 10] = [
    "2020 Maruti Swift",
    "2022 Tata Nexon EV",
    "2021 Hyundai Creta",
    "2023 Mahindra XUV700",
    "2019 Honda City",
    "2022 Kia Seltos",
    "2021 Toyota Fortuner",
    "2020 MG Hector",
    "2023 Tata Punch",
    "2021 Maruti Brezza",
];

pub const ISSUES: [&str; 12] = [
    "Brake temperature spike detected",
    "Battery degradation warning - 65% health",
    "Engine temperature above threshold",
    "Oil pressure dropping rapidly",
    "Brake pad wear critical - 90% worn",
    "Coolant level low",
    "Tire pressure abnormal - front left",
    "Transmission fluid temperature high",
    "Battery voltage fluctuation",
    "ABS sensor malfunction",
    "Oxygen sensor failure imminent",
    "Fuel pump pressure irregular",
];

pub const LOCATIONS: [&str; 12] = [
    "Mumbai, Maharashtra",
    "Delhi, NCR",
    "Bangalore, Karnataka",
    "Hyderabad, Telangana",
    "Chennai, Tamil Nadu",
    "Pune, Maharashtra",
    "Kolkata, West Bengal",
    "Ahmedabad, Gujarat",
    "Jaipur, Rajasthan",
    "Lucknow, Uttar Pradesh",
    "Indore, Madhya Pradesh",
    "Chandigarh, Punjab",
];

/// Cumulative weights for critical / medium; everything above is low.
const CRITICAL_WEIGHT: f64 = 0.2;
const MEDIUM_WEIGHT: f64 = 0.4;

pub fn draw_severity(rng: &mut dyn RandomSource) -> Severity {
    let roll = rng.next_f64();
    if roll < CRITICAL_WEIGHT {
        Severity::Critical
    } else if roll < CRITICAL_WEIGHT + MEDIUM_WEIGHT {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Draws a fresh alert in the `analyzing` state.
///
/// Draw order is severity, vehicle number, model, issue, location.
pub fn generate_alert(rng: &mut dyn RandomSource, now: DateTime<Utc>) -> Alert {
    let severity = draw_severity(rng);
    let vehicle_number = rng.range_inclusive(100, 999);

    Alert {
        id: Uuid::new_v4(),
        vehicle_id: format!("VEH{vehicle_number}"),
        vehicle_model: rng.pick(&VEHICLE_MODELS).to_string(),
        severity,
        issue: rng.pick(&ISSUES).to_string(),
        location: rng.pick(&LOCATIONS).to_string(),
        status: AlertStatus::Analyzing,
        created_at: now,
        resolved_at: None,
    }
}

pub fn scanning_message(alert: &Alert) -> String {
    format!("Scanning {} - {}", alert.vehicle_model, alert.issue)
}

/// Activity line for entering `status`; `None` for the initial state.
pub fn transition_message(alert: &Alert, status: AlertStatus) -> Option<String> {
    match status {
        AlertStatus::Analyzing => None,
        AlertStatus::CallingCustomer => Some(format!("Customer Agent calling {} owner", alert.vehicle_model)),
        AlertStatus::AppointmentScheduled => Some(format!("Appointment booked for {}", alert.vehicle_model)),
        AlertStatus::Resolved => Some(format!("Issue resolved for {}", alert.vehicle_model)),
    }
}

pub fn escalation_message(alert: &Alert) -> String {
    format!("URGENT: {} escalated for {}", alert.issue, alert.vehicle_model)
}

pub const INSIGHT_MESSAGE: &str = "Manufacturing insight generated and sent to OEM";
