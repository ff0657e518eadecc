use super::post_controller::{
    create_post, delete_post, list_posts, method_not_allowed, preflight,
};
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::method(actix_web::http::Method::OPTIONS).to(preflight))
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post))
            .route(web::delete().to(delete_post))
            .default_service(web::to(method_not_allowed)),
    );
}
