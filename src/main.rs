use actix_web::{HttpServer, web};
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use posts_service::middleware::auth::ClaimsConfig;
use posts_service::utils::config::AppConfig;
use posts_service::{build_post_service, create_app};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger with environment variable support
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let post_service = build_post_service(&config)
        .await
        .map(web::Data::new)
        .map_err(std::io::Error::other)?;
    let claims_config = ClaimsConfig::new(config.jwt_secret.clone());

    info!(
        "Starting posts service on http://{}:{} (backend: {:?}, ownership checks: {})",
        config.host, config.port, config.backend, config.enforce_ownership
    );

    HttpServer::new(move || create_app(post_service.clone(), claims_config.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    // Log after server has started (this line will only be reached when the server shuts down)
    info!("Server has stopped");

    Ok(())
}
