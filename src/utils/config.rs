use std::env;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Which pair of store/blob backends the server is wired to
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// MongoDB for posts, S3 for images
    Aws { region: String, bucket: String },
    /// In-process stores, for local development
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: StorageBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub table_name: String,
    pub enforce_ownership: bool,
    pub jwt_secret: Option<String>,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 8000,
        };

        let backend = match var("STORAGE_BACKEND").as_deref().unwrap_or("aws") {
            "aws" => StorageBackend::Aws {
                region: var("REGION_NAME").ok_or(ConfigError::Missing("REGION_NAME"))?,
                bucket: var("S3_BUCKET_NAME").ok_or(ConfigError::Missing("S3_BUCKET_NAME"))?,
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let enforce_ownership = match var("ENFORCE_OWNERSHIP") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                name: "ENFORCE_OWNERSHIP",
                value: raw,
            })?,
            None => true,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            backend,
            mongodb_uri: var("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: var("DATABASE_NAME").unwrap_or_else(|| "portfolio".to_string()),
            table_name: var("TABLE_NAME").unwrap_or_else(|| "Posts".to_string()),
            enforce_ownership,
            jwt_secret: var("JWT_SECRET"),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
