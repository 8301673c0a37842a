//! AWS Lambda handler for loan optimization
//!
//! Accepts an optimization request as JSON and returns the full result.
//! Supports Lambda Function URLs for direct HTTP access.
//!
//! Set ASSUMPTIONS_DIR to load assumption CSVs instead of the built-in tables.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use loan_optimizer::{EngineError, OptimizationEngine, OptimizationRequest};
use serde::Deserialize;
use std::path::Path;

/// Request body: the optimization request plus an optional evaluation date
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeBody {
    #[serde(flatten)]
    request: OptimizationRequest,
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

fn response(status_code: i64, body: Option<String>) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn error_response(status_code: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    response(status_code, Some(body))
}

/// Lambda handler function
async fn handler(
    engine: &OptimizationEngine,
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let payload = event.payload;

    // Handle CORS preflight
    if payload.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, None);
    }

    if payload.is_base64_encoded {
        return error_response(400, "Base64-encoded bodies are not supported; send application/json");
    }
    let body = payload.body.unwrap_or_default();

    let parsed: OptimizeBody = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let as_of = parsed.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());

    match engine.optimize(&parsed.request, as_of) {
        Ok(result) => {
            log::info!(
                "Optimized request in {} ms: {}",
                start.elapsed().as_millis(),
                result.recommendation.recommended_strategy
            );
            response(200, Some(serde_json::to_string(&result)?))
        }
        Err(e @ EngineError::Validation { .. }) => error_response(400, &e.to_string()),
        Err(e) => {
            log::error!("Optimization failed: {}", e);
            error_response(500, &e.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let engine = match std::env::var("ASSUMPTIONS_DIR") {
        Ok(dir) => OptimizationEngine::from_csv_path(Path::new(&dir))?,
        Err(_) => OptimizationEngine::with_default_assumptions()?,
    };
    let engine = &engine;

    run(service_fn(move |event| async move { handler(engine, event).await })).await
}
