use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use log::debug;
use serde_json::json;

use crate::MAX_BODY_BYTES;
use crate::middleware::auth::Claims;
use crate::post::post_model::{CreatePostRequest, DeletePostQuery};
use crate::post::post_service::PostService;
use crate::utils::error::PostError;
use crate::utils::response::json_response;

pub async fn preflight() -> HttpResponse {
    json_response(
        StatusCode::OK,
        json!({ "message": "CORS preflight successful" }),
    )
}

pub async fn list_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, PostError> {
    let posts = post_service.list_posts().await?;
    Ok(json_response(StatusCode::OK, posts))
}

pub async fn create_post(
    post_service: web::Data<PostService>,
    payload: web::Payload,
    claims: Claims,
) -> Result<HttpResponse, PostError> {
    let body = read_body(payload, MAX_BODY_BYTES).await?;
    debug!("POST body: {}", String::from_utf8_lossy(&body));

    // An absent body is read as an empty object
    let request: CreatePostRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreatePostRequest::default()
    } else {
        serde_json::from_slice(&body)?
    };

    let id = post_service.create_post(request, claims).await?;

    Ok(json_response(
        StatusCode::OK,
        json!({ "message": "Post saved successfully", "id": id }),
    ))
}

/// Collect the request body, refusing anything larger than `limit` bytes
async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut, PostError> {
    let mut body = web::BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(PostError::dependency)?;
        if body.len() + chunk.len() > limit {
            return Err(PostError::PayloadTooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

pub async fn delete_post(
    post_service: web::Data<PostService>,
    req: HttpRequest,
    claims: Claims,
) -> Result<HttpResponse, PostError> {
    let query = web::Query::<DeletePostQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_default();

    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| PostError::Validation("Missing 'id' query parameter".to_string()))?;

    post_service.delete_post(&id, &claims).await?;

    Ok(json_response(
        StatusCode::OK,
        json!({ "message": format!("Post {} deleted successfully", id) }),
    ))
}

pub async fn method_not_allowed() -> Result<HttpResponse, PostError> {
    Err(PostError::MethodNotAllowed)
}
