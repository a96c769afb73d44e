use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A note assigned to a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Note {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Owning user's id
    pub user: Uuid,
    pub title: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(user: Uuid, title: impl Into<String>, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user,
            title: title.into(),
            text: text.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_schema_includes_timestamp_fields() {
        use utoipa::PartialSchema;

        let schema = serde_json::to_value(Note::schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("created_at").is_some());
        assert!(properties.get("updated_at").is_some());
    }

    #[test]
    fn new_note_starts_open() {
        let owner = Uuid::new_v4();
        let note = Note::new(owner, "Repairs", "Fix the door");
        assert_eq!(note.user, owner);
        assert!(!note.completed);
        assert_eq!(note.created_at, note.updated_at);
    }
}
