pub mod config;
pub mod error;
pub mod numbers;
pub mod response;
