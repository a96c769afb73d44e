//! Notes Domain
//!
//! Persistence layer for notes assigned to users. The accounts API only
//! needs to know whether a user still has notes before it will delete the
//! account, so the repository surface here is intentionally small.

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;

pub use error::{NoteError, NoteResult};
pub use models::Note;
pub use mongodb::MongoNoteRepository;
pub use repository::{InMemoryNoteRepository, NoteRepository};
