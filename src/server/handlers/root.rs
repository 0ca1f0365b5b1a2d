use axum::extract::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Google Maps Crawler API",
        "endpoints": {
            "POST /crawl": "Crawl places from Google Maps (requires: location, radius)",
            "GET /places": "Get all stored places (supports: ?limit=10&offset=0 for pagination)"
        }
    }))
}
