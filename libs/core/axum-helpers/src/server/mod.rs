//! Server infrastructure.
//!
//! - Router setup with OpenAPI documentation and common middleware
//! - Health endpoint
//! - Graceful shutdown coordination

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_production_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
