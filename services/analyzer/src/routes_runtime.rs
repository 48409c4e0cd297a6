use axum::{extract::State, Json};

pub async fn get_runtime(State(state): State<crate::state::SharedState>) -> Json<serde_json::Value> {
    let info = state.runtime.info();
    let status = state.runtime.status().await;

    Json(serde_json::json!({
        "provider": info,
        "status": status,
        "lookups": state.aggregator.configured(),
        "max_input_chars": state.max_input_chars,
    }))
}
