//! Users Domain
//!
//! This module provides a complete domain implementation for managing user
//! accounts using MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! Deleting a user consults the notes domain first: an account that still
//! owns notes is never removed.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_notes::MongoNoteRepository;
//! use domain_users::{
//!     handlers,
//!     mongodb::MongoUserRepository,
//!     service::UserService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let users = MongoUserRepository::new(db.clone());
//! let notes = MongoNoteRepository::new(db);
//! let service = UserService::new(users, notes);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, DeleteUser, MessageResponse, Role, UpdateUser, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
