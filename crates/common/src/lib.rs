//! khreact Common Library
//!
//! Shared code for the khreact service including:
//! - The Point entity, its DTO and mapper
//! - Database models, schema and repository
//! - The point service (one transaction per use case)
//! - Paging and sorting
//! - Error types, handling and alert headers
//! - Configuration management
//! - Metrics and observability

pub mod alert;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod metrics;
pub mod pagination;
pub mod service;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, PointRepository};
pub use domain::Point;
pub use errors::{AppError, Result};
pub use pagination::{Page, PageRequest};
pub use service::{PointDto, PointService};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name used as the prefix of alert headers and message keys
pub const APPLICATION_NAME: &str = "khreactApp";
