//! Users API routes
//!
//! Wires the users domain to HTTP routes. Deletion consults the notes
//! collection, so the service gets both repositories.

use axum::Router;
use domain_notes::MongoNoteRepository;
use domain_users::{MongoUserRepository, UserService, handlers};
use tracing::info;

use crate::state::AppState;

/// Create users router
pub fn router(state: &AppState) -> Router {
    let users = MongoUserRepository::new(state.db.clone());
    let notes = MongoNoteRepository::new(state.db.clone());

    let service = UserService::new(users, notes);

    handlers::router(service)
}

/// Ensure collection indexes exist before serving traffic
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(db.clone());
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
