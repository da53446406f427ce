//! AWS Lambda handler for pro-forma runs
//!
//! Accepts a scenario as JSON and returns the snapshot and projection.
//! Works both when invoked directly (the event is the request) and behind a
//! Lambda Function URL (the request is the `body` string of the event).

use laundromat_proforma::inputs::form_from_value;
use laundromat_proforma::report::ReportEnvelope;
use laundromat_proforma::{evaluate, presets, ProFormaInputs};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::Deserialize;
use serde_json::{json, Value};

/// Request payload
///
/// Exactly one of `inputs` or `form` is normally given; with neither the
/// canonical store is evaluated.
#[derive(Debug, Default, Deserialize)]
pub struct ProFormaRequest {
    /// Structured scenario
    #[serde(default)]
    pub inputs: Option<ProFormaInputs>,

    /// Flat form fields; machines and costs come from the canonical store
    #[serde(default)]
    pub form: Option<Value>,

    /// Override for the projection horizon
    #[serde(default)]
    pub horizon: Option<u32>,
}

fn error_response(status: u16, message: &str) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
        },
        "body": json!({ "error": message }).to_string(),
    })
}

fn json_response(body: &ReportEnvelope) -> Result<Value, serde_json::Error> {
    Ok(json!({
        "statusCode": 200,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": serde_json::to_string(body)?,
    }))
}

/// Pull the request out of a raw or Function URL event
fn request_from_event(event: Value) -> Result<ProFormaRequest, serde_json::Error> {
    match event.get("body") {
        Some(Value::String(body)) if body.trim().is_empty() => Ok(ProFormaRequest::default()),
        Some(Value::String(body)) => serde_json::from_str(body),
        Some(Value::Null) => Ok(ProFormaRequest::default()),
        _ => serde_json::from_value(event),
    }
}

fn is_preflight(event: &Value) -> bool {
    event
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
        .map(|method| method.eq_ignore_ascii_case("OPTIONS"))
        .unwrap_or(false)
}

/// Lambda handler function
async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let (payload, _context) = event.into_parts();

    if is_preflight(&payload) {
        return Ok(json!({
            "statusCode": 200,
            "headers": {
                "Access-Control-Allow-Origin": "*",
                "Access-Control-Allow-Methods": "POST, OPTIONS",
                "Access-Control-Allow-Headers": "Content-Type",
            },
        }));
    }

    let request = match request_from_event(payload) {
        Ok(r) => r,
        Err(e) => {
            warn!("Rejected request: {}", e);
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let mut inputs = match (request.inputs, request.form) {
        (Some(inputs), _) => inputs,
        (None, Some(form)) => match form_from_value(&form) {
            Ok(form) => form.to_inputs(
                presets::canonical_washers(),
                presets::canonical_dryers(),
                presets::canonical_equipment_costs(),
            ),
            Err(e) => return Ok(error_response(400, &e.to_string())),
        },
        (None, None) => presets::canonical_store(),
    };

    if let Some(horizon) = request.horizon {
        inputs.growth.horizon_years = horizon;
    }

    let result = match evaluate(&inputs) {
        Ok(r) => r,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    info!(
        "Evaluated scenario in {} ms: ebitda={:.2}, payback={}",
        start.elapsed().as_millis(),
        result.snapshot.ebitda,
        result.projection.payback_years
    );

    let envelope = ReportEnvelope::new(result.snapshot, result.projection);
    Ok(json_response(&envelope)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
