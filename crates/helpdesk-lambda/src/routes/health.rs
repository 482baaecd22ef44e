use axum::Json;
use serde_json::{Value, json};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn test_get() -> Json<Value> {
    Json(json!({ "success": true, "message": "Test route is working!" }))
}

pub async fn test_post() -> Json<Value> {
    Json(json!({ "success": true, "message": "Test route POST is working!" }))
}
