//! MongoDB implementation of NoteRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::NoteResult;
use crate::models::Note;
use crate::repository::NoteRepository;

/// MongoDB implementation of the NoteRepository
pub struct MongoNoteRepository {
    collection: Collection<Note>,
}

impl MongoNoteRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Note>("notes");
        Self { collection }
    }

    /// Create a new MongoNoteRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Note>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Note> {
        &self.collection
    }
}

#[async_trait]
impl NoteRepository for MongoNoteRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> NoteResult<Option<Note>> {
        let filter = doc! { "user": to_bson(&user_id).unwrap_or(Bson::Null) };
        let note = self.collection.find_one(filter).await?;
        Ok(note)
    }
}
