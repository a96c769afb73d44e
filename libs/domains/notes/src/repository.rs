use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::NoteResult;
use crate::models::Note;

/// Repository trait for Note persistence
///
/// The accounts service only reads notes to decide whether a user can be
/// deleted, so this trait exposes lookup by owner and nothing else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Find any note assigned to the given user
    async fn find_by_user(&self, user_id: Uuid) -> NoteResult<Option<Note>>;
}

/// In-memory NoteRepository backed by a HashMap, for tests and local runs
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Arc<RwLock<HashMap<Uuid, Note>>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note directly into the store
    pub async fn insert(&self, note: Note) {
        self.notes.write().await.insert(note.id, note);
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_user(&self, user_id: Uuid) -> NoteResult<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.values().find(|note| note.user == user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_by_user_returns_owned_note() {
        let repo = InMemoryNoteRepository::new();
        let owner = Uuid::new_v4();
        repo.insert(Note::new(owner, "Inventory", "Count the stock"))
            .await;

        let found = repo.find_by_user(owner).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().user, owner);
    }

    #[tokio::test]
    async fn find_by_user_misses_other_owners() {
        let repo = InMemoryNoteRepository::new();
        repo.insert(Note::new(Uuid::new_v4(), "Inventory", "Count the stock"))
            .await;

        let found = repo.find_by_user(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }
}
