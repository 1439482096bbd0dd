/// Campus Service Library
///
/// Backend for a university community network: registration and login,
/// posts with likes and comments, and a lightly personalized feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Row types and response projections
/// - `services`: Business logic layer
/// - `db`: Database access layer
/// - `security`: Credential hashing and verification
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
