use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use fairdeal_offer::{EvaluationRequest, EvaluationResult};
use serde_json::Value;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

/// POST /analyze
/// Price an influencer offer against platform benchmarks and suggest a counter.
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EvaluationResult>, AppError> {
    // Only an object can carry a platform; anything else fails like a missing one
    let request = match payload {
        Ok(Json(body @ Value::Object(_))) => serde_json::from_value(body).unwrap_or_default(),
        Ok(Json(other)) => {
            tracing::debug!("Analyze body is not an object: {}", other);
            EvaluationRequest::default()
        }
        Err(rejection) => {
            tracing::debug!("Unreadable analyze body: {}", rejection);
            EvaluationRequest::default()
        }
    };

    let result = state.evaluator.evaluate(&request).await?;
    Ok(Json(result))
}
