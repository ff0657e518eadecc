use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{App, Error, web};

pub mod database;
pub mod middleware;
pub mod post;
pub mod router;
pub mod uploader;
pub mod utils;

use database::{InMemoryPostStore, MongoPostStore, PostStore, StoreError};
use middleware::auth::ClaimsConfig;
use middleware::not_found::not_found;
use post::post_service::PostService;
use router::index::routes;
use uploader::{BlobStore, InMemoryBlobStore, S3BlobStore};
use utils::config::{AppConfig, StorageBackend};
use utils::response::cors_headers;

/// Largest request body accepted; base64 images make create bodies large
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the store and blob handles named by `config`. Called once at start-up.
pub async fn build_post_service(config: &AppConfig) -> Result<PostService, StoreError> {
    let (store, blobs): (Arc<dyn PostStore>, Arc<dyn BlobStore>) = match &config.backend {
        StorageBackend::Aws { region, bucket } => {
            let client = database::db::connect_to_mongo(&config.mongodb_uri).await?;
            (
                Arc::new(MongoPostStore::new(
                    &client,
                    &config.database_name,
                    &config.table_name,
                )),
                Arc::new(S3BlobStore::new(region, bucket).await),
            )
        }
        StorageBackend::Memory => (
            Arc::new(InMemoryPostStore::new()),
            Arc::new(InMemoryBlobStore::new()),
        ),
    };

    Ok(PostService::new(store, blobs, config.enforce_ownership))
}

/// The full application: posts resource, CORS headers, 404 fallback
pub fn create_app(
    post_service: web::Data<PostService>,
    claims_config: ClaimsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let enforce_ownership = post_service.enforce_ownership();

    App::new()
        .app_data(post_service)
        .app_data(web::Data::new(claims_config))
        .configure(routes)
        .default_service(web::to(not_found))
        .wrap(cors_headers(enforce_ownership))
        .wrap(Logger::default())
}
