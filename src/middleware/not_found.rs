use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde_json::json;

use crate::utils::response::json_response;

/// Answer for every path other than the posts resource, whatever the method
pub async fn not_found() -> HttpResponse {
    json_response(StatusCode::NOT_FOUND, json!({ "message": "Not Found" }))
}
