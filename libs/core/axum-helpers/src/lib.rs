//! # Axum Helpers
//!
//! Shared infrastructure for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`errors`]**: structured error responses with error codes
//! - **[`server`]**: router setup with OpenAPI docs, health endpoint,
//!   graceful shutdown
//! - **[`http`]**: HTTP middleware (security headers)
//!
//! ## Quick start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! let app = router.merge(health_router(app_info!()));
//! create_production_app(app, &ServerConfig::default(), Duration::from_secs(30), cleanup).await?;
//! ```

pub mod errors;
pub mod http;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export server types
pub use server::{
    HealthResponse, ShutdownCoordinator, create_app, create_production_app, create_router,
    health_router, shutdown_signal,
};
