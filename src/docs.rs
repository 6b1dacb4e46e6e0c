use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{models, routes, simulation};

#[derive(OpenApi)]
#[openapi(
	info(title = "fleetwatch", description = "Simulated predictive-maintenance alert console"),
	paths(
		routes::health::health,
		routes::vehicles::list_vehicles,
		routes::vehicles::get_vehicle,
		routes::alerts::get_simulation,
		routes::alerts::list_alerts,
		routes::alerts::dismiss_alert,
		routes::alerts::escalate_alert,
		routes::alerts::list_activity,
		routes::voice::voice_command,
		routes::reports::get_report,
		routes::reports::ask_report
	),
	components(
		schemas(
			routes::health::HealthResponse,
			models::vehicle::Powertrain,
			models::vehicle::Vehicle,
			models::vehicle::VehicleListResponse,
			models::vehicle::VehicleResponse,
			models::alert::Severity,
			models::alert::AlertStatus,
			models::alert::Alert,
			models::activity::ActivityKind,
			models::activity::ActivityLogEntry,
			models::counters::LiveCounters,
			models::counters::Statistics,
			models::counters::Toast,
			models::security::SecurityStatus,
			models::voice::View,
			models::voice::VoiceCommandRequest,
			models::voice::VoiceCommandResponse,
			models::report::AgentKind,
			models::report::AgentReport,
			models::report::ReportQuestion,
			models::report::ReportAnswer,
			simulation::SimulationSnapshot
		)
	),
	tags(
		(name = "Health", description = "Liveness"),
		(name = "Vehicles", description = "Demo fleet catalog"),
		(name = "Alerts", description = "Simulated alert feed and activity log"),
		(name = "Voice", description = "Voice command interpreter"),
		(name = "Agents", description = "Canned agent reports")
	)
)]
pub struct ApiDoc;

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
	let mut doc = serde_json::to_value(&ApiDoc::openapi())?;

	ensure_openapi_version(&mut doc);
	add_examples(&mut doc);
	ensure_servers(&mut doc, port);

	Ok(serde_json::from_value(doc)?)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> anyhow::Result<Router> {
	let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"]).try_it_out_enabled(true);

	let doc_json = Arc::new(serde_json::to_value(&doc)?);

	let json_route = {
		let doc_json = Arc::clone(&doc_json);
		get(move || {
			let doc_json = Arc::clone(&doc_json);
			async move { Json((*doc_json).clone()) }
		})
	};

	Ok(Router::new()
		.route("/api-docs/openapi.json", json_route)
		.merge(SwaggerUi::new("/docs").config(swagger_config)))
}

fn ensure_openapi_version(doc: &mut Value) {
	if let Some(root) = doc.as_object_mut() {
		root.entry("openapi")
			.or_insert_with(|| Value::String("3.0.3".to_string()));
	}
}

// Path parameters get a concrete example so Try-it-out works without typing.
fn add_examples(doc: &mut Value) {
	let Some(paths) = doc.get_mut("paths").and_then(Value::as_object_mut) else {
		return;
	};
	for item in paths.values_mut() {
		let Some(operations) = item.as_object_mut() else {
			continue;
		};
		for operation in operations.values_mut() {
			let Some(parameters) = operation.get_mut("parameters").and_then(Value::as_array_mut) else {
				continue;
			};
			for param in parameters {
				let example = match param.get("name").and_then(Value::as_str) {
					Some("vehicle_id") => json!("VEH001"),
					Some("agent_id") => json!("diagnosis"),
					Some("severity") => json!("critical"),
					_ => continue,
				};
				if let Some(obj) = param.as_object_mut() {
					obj.entry("example").or_insert(example);
				}
			}
		}
	}
}

fn ensure_servers(doc: &mut Value, port: u16) {
	let server_url = format!("http://localhost:{}", port);

	match doc.get_mut("servers") {
		Some(Value::Array(arr)) => {
			let has = arr.iter().any(|v| v.get("url").and_then(Value::as_str) == Some(server_url.as_str()));
			if !has {
				arr.push(json!({ "url": server_url }));
			}
		}
		_ => {
			doc["servers"] = json!([{ "url": server_url }]);
		}
	}
}
