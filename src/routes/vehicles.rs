use axum::extract::Path;
use axum::Json;

use crate::errors::{AppError, AppResult};
use crate::models::vehicle::{find_vehicle, fleet, VehicleListResponse, VehicleResponse};

#[utoipa::path(
    get,
    path = "/api/vehicles",
    tag = "Vehicles",
    responses((status = 200, description = "Demo fleet", body = VehicleListResponse))
)]
pub async fn list_vehicles() -> Json<VehicleListResponse> {
    let vehicles = fleet();
    Json(VehicleListResponse {
        success: true,
        count: vehicles.len(),
        vehicles,
    })
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle id, e.g. VEH001")),
    responses(
        (status = 200, description = "Vehicle detail", body = VehicleResponse),
        (status = 404, description = "Unknown vehicle")
    )
)]
pub async fn get_vehicle(Path(id): Path<String>) -> AppResult<Json<VehicleResponse>> {
    let vehicle = find_vehicle(&id).ok_or_else(|| AppError::not_found(format!("vehicle {id}")))?;
    Ok(Json(VehicleResponse {
        success: true,
        vehicle,
    }))
}
