use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Powertrain {
    #[serde(rename = "ICE")]
    Ice,
    #[serde(rename = "EV")]
    Ev,
}

impl Powertrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Powertrain::Ice => "ICE",
            Powertrain::Ev => "EV",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vehicle {
    #[schema(example = "VEH001")]
    pub vehicle_id: String,
    #[schema(example = "2020 Maruti Swift")]
    pub model: String,
    pub year: u16,
    pub owner: String,
    #[serde(rename = "type")]
    pub powertrain: Powertrain,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleListResponse {
    pub success: bool,
    pub count: usize,
    pub vehicles: Vec<Vehicle>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponse {
    pub success: bool,
    pub vehicle: Vehicle,
}

fn vehicle(id: &str, model: &str, year: u16, owner: &str, powertrain: Powertrain, phone: &str) -> Vehicle {
    Vehicle {
        vehicle_id: id.to_string(),
        model: model.to_string(),
        year,
        owner: owner.to_string(),
        powertrain,
        phone: phone.to_string(),
    }
}

/// The demo fleet shown across the dashboard pages.
pub fn fleet() -> Vec<Vehicle> {
    vec![
        vehicle("VEH001", "2020 Maruti Swift", 2020, "Mr. Rajesh Sharma", Powertrain::Ice, "+91-9876543210"),
        vehicle("VEH002", "2022 Tata Nexon EV", 2022, "Ms. Priya Patel", Powertrain::Ev, "+91-9876543211"),
        vehicle("VEH003", "2021 Hyundai Creta", 2021, "Mr. Amit Kumar", Powertrain::Ice, "+91-9876543212"),
    ]
}

/// Case-insensitive lookup in the demo fleet.
pub fn find_vehicle(vehicle_id: &str) -> Option<Vehicle> {
    fleet()
        .into_iter()
        .find(|v| v.vehicle_id.eq_ignore_ascii_case(vehicle_id))
}
