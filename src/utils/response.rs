use actix_web::{HttpResponse, http::StatusCode, middleware::DefaultHeaders};
use serde::Serialize;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS, DELETE";

/// Headers the browser may send; Authorization only matters once posts are owned
pub fn allow_headers(enforce_ownership: bool) -> &'static str {
    if enforce_ownership {
        "Content-Type,Authorization"
    } else {
        "Content-Type"
    }
}

/// CORS header set stamped onto every response the app produces
pub fn cors_headers(enforce_ownership: bool) -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", ALLOW_ORIGIN))
        .add(("Access-Control-Allow-Methods", ALLOW_METHODS))
        .add((
            "Access-Control-Allow-Headers",
            allow_headers(enforce_ownership),
        ))
}

/// Uniform JSON envelope used by every handler and error path
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> HttpResponse {
    HttpResponse::build(status).json(body)
}
