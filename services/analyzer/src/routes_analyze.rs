use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::aggregate::Analysis;
use crate::state::SharedState;

pub const EXAMPLE_TEXT: &str = "The moon landing was staged.";

#[derive(Deserialize)]
pub struct AnalyzeReq {
    pub text: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

type Rejection = (StatusCode, Json<ApiError>);

fn check_length(state: &SharedState, text: &str) -> Result<(), Rejection> {
    let chars = text.chars().count();
    if chars > state.max_input_chars {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError {
                error: format!("text is {chars} characters, limit is {}", state.max_input_chars),
            }),
        ));
    }
    Ok(())
}

pub async fn post_analyze(
    State(state): State<SharedState>,
    Json(req): Json<AnalyzeReq>,
) -> Result<Json<Analysis>, Rejection> {
    check_length(&state, &req.text)?;
    Ok(Json(state.aggregator.analyze(&req.text).await))
}

pub async fn post_report(
    State(state): State<SharedState>,
    Json(req): Json<AnalyzeReq>,
) -> Result<impl IntoResponse, Rejection> {
    check_length(&state, &req.text)?;
    let analysis = state.aggregator.analyze(&req.text).await;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        crate::report::render(&analysis),
    ))
}

pub async fn get_example() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "text": EXAMPLE_TEXT }))
}
