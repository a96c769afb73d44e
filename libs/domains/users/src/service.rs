//! User Service - Business logic layer

use std::sync::Arc;

use domain_notes::NoteRepository;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, DeleteUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

/// Fixed bcrypt work factor for password hashing
const HASH_COST: u32 = 10;

/// Hash a plaintext password with the fixed work factor
pub fn hash_password(password: &str) -> UserResult<String> {
    bcrypt::hash(password, HASH_COST).map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Verify a plaintext password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// User service providing business logic operations
///
/// The service layer enforces field presence, the duplicate-username
/// pre-check, password hashing, and the notes dependency check on delete.
/// The duplicate check is check-then-act: two concurrent creates with the
/// same username can both pass it, and no store constraint backs it up.
pub struct UserService<R: UserRepository, N: NoteRepository> {
    users: Arc<R>,
    notes: Arc<N>,
}

impl<R: UserRepository, N: NoteRepository> UserService<R, N> {
    /// Create a new UserService over a user store and a note store
    pub fn new(users: R, notes: N) -> Self {
        Self {
            users: Arc::new(users),
            notes: Arc::new(notes),
        }
    }

    /// List all users, without password hashes
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.users.list().await?;
        if users.is_empty() {
            return Err(UserError::NoUsersFound);
        }
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Create a new user
    ///
    /// Requires username, password, and a non-empty roles sequence. The
    /// password is checked for emptiness, not truthiness, so `"0"` is a
    /// valid password.
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let username = non_empty(input.username).ok_or(UserError::MissingFields)?;
        let password = non_empty(input.password).ok_or(UserError::MissingFields)?;
        let roles = input
            .roles
            .filter(|r| !r.is_empty())
            .ok_or(UserError::MissingFields)?;

        if self.users.get_by_username(&username).await?.is_some() {
            return Err(UserError::DuplicateUsername);
        }

        let password_hash = hash_password(&password)?;
        let user = User::new(username, password_hash, roles);

        match self.users.create(user).await {
            Ok(user) => Ok(user),
            Err(err) => {
                tracing::warn!(error = %err, "user store rejected insert");
                Err(UserError::InvalidUserData)
            }
        }
    }

    /// Update an existing user
    ///
    /// Requires id, username, a non-empty roles sequence, and active.
    /// Username, roles, and active are overwritten unconditionally; the
    /// password hash is recomputed only when a non-empty password is
    /// supplied. A duplicate-username match against the target user itself
    /// is allowed (no-op rename).
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, input: UpdateUser) -> UserResult<User> {
        let id = input.id.ok_or(UserError::MissingFields)?;
        let username = non_empty(input.username).ok_or(UserError::MissingFields)?;
        let roles = input
            .roles
            .filter(|r| !r.is_empty())
            .ok_or(UserError::MissingFields)?;
        let active = input.active.ok_or(UserError::MissingFields)?;

        let mut user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Some(duplicate) = self.users.get_by_username(&username).await? {
            if duplicate.id != id {
                return Err(UserError::UsernameConflict);
            }
        }

        user.username = username;
        user.roles = roles;
        user.active = active;
        if let Some(password) = non_empty(input.password) {
            user.password_hash = hash_password(&password)?;
        }

        self.users.update(user).await
    }

    /// Delete a user, returning the removed record
    ///
    /// Refused while any note still references the user. The note check,
    /// user fetch, and delete are three separate store calls with no
    /// transaction around them.
    #[instrument(skip(self, input))]
    pub async fn delete_user(&self, input: DeleteUser) -> UserResult<User> {
        let id = input.id.ok_or(UserError::MissingId)?;

        if self.notes.find_by_user(id).await?.is_some() {
            return Err(UserError::HasAssignedNotes);
        }

        let user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        self.users.delete(id).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repository::MockUserRepository;
    use domain_notes::{InMemoryNoteRepository, Note};
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn stored_user(username: &str) -> User {
        User::new(
            username.into(),
            hash_password("secret").unwrap(),
            vec![Role::Employee],
        )
    }

    fn service(users: MockUserRepository) -> UserService<MockUserRepository, InMemoryNoteRepository> {
        UserService::new(users, InMemoryNoteRepository::new())
    }

    async fn service_with_note(
        users: MockUserRepository,
        owner: Uuid,
    ) -> UserService<MockUserRepository, InMemoryNoteRepository> {
        let notes = InMemoryNoteRepository::new();
        notes.insert(Note::new(owner, "Repairs", "Fix the door")).await;
        UserService::new(users, notes)
    }

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hash = hash_password("pw1").unwrap();
        assert_ne!(hash, "pw1");
        assert!(verify_password("pw1", &hash).unwrap());
        assert!(!verify_password("pw2", &hash).unwrap());
    }

    #[tokio::test]
    async fn list_on_empty_store_is_no_users_found() {
        let mut users = MockUserRepository::new();
        users.expect_list().returning(|| Ok(vec![]));

        let result = service(users).list_users().await;
        assert!(matches!(result, Err(UserError::NoUsersFound)));
    }

    #[tokio::test]
    async fn list_strips_password_hashes() {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .returning(|| Ok(vec![stored_user("hank")]));

        let listed = service(users).list_users().await.unwrap();
        assert_eq!(listed.len(), 1);
        let json = serde_json::to_value(&listed[0]).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_touching_the_store() {
        // No expectations set: any repository call would panic.
        let svc = service(MockUserRepository::new());

        let inputs = [
            CreateUser {
                password: Some("pw".into()),
                roles: Some(vec![Role::Employee]),
                ..Default::default()
            },
            CreateUser {
                username: Some("hank".into()),
                roles: Some(vec![Role::Employee]),
                ..Default::default()
            },
            CreateUser {
                username: Some("hank".into()),
                password: Some("pw".into()),
                roles: Some(vec![]),
                ..Default::default()
            },
            CreateUser {
                username: Some("".into()),
                password: Some("pw".into()),
                roles: Some(vec![Role::Employee]),
                ..Default::default()
            },
        ];

        for input in inputs {
            let result = svc.create_user(input).await;
            assert!(matches!(result, Err(UserError::MissingFields)));
        }
    }

    #[tokio::test]
    async fn create_accepts_password_zero() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_username()
            .with(eq("hank"))
            .returning(|_| Ok(None));
        users.expect_create().returning(Ok);

        let user = service(users)
            .create_user(CreateUser {
                username: Some("hank".into()),
                password: Some("0".into()),
                roles: Some(vec![Role::Employee]),
            })
            .await
            .unwrap();

        assert!(verify_password("0", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_username()
            .with(eq("hank"))
            .returning(|_| Ok(Some(stored_user("hank"))));

        let result = service(users)
            .create_user(CreateUser {
                username: Some("hank".into()),
                password: Some("pw".into()),
                roles: Some(vec![Role::Employee]),
            })
            .await;

        assert!(matches!(result, Err(UserError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn create_maps_store_rejection_to_invalid_user_data() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_username().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|_| Err(UserError::Database("write refused".into())));

        let result = service(users)
            .create_user(CreateUser {
                username: Some("hank".into()),
                password: Some("pw".into()),
                roles: Some(vec![Role::Employee]),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidUserData)));
    }

    #[tokio::test]
    async fn create_hashes_the_password() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_username().returning(|_| Ok(None));
        users.expect_create().returning(Ok);

        let user = service(users)
            .create_user(CreateUser {
                username: Some("alice".into()),
                password: Some("pw1".into()),
                roles: Some(vec![Role::Employee]),
            })
            .await
            .unwrap();

        assert_ne!(user.password_hash, "pw1");
        assert!(verify_password("pw1", &user.password_hash).unwrap());
        assert!(user.active);
    }

    #[tokio::test]
    async fn update_requires_all_fields() {
        let svc = service(MockUserRepository::new());

        let result = svc
            .update_user(UpdateUser {
                id: Some(Uuid::new_v4()),
                username: Some("hank".into()),
                roles: Some(vec![Role::Employee]),
                active: None,
                password: None,
            })
            .await;

        assert!(matches!(result, Err(UserError::MissingFields)));
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|_| Ok(None));

        let result = service(users)
            .update_user(UpdateUser {
                id: Some(Uuid::new_v4()),
                username: Some("hank".into()),
                roles: Some(vec![Role::Employee]),
                active: Some(true),
                password: None,
            })
            .await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn update_rejects_username_owned_by_another_user() {
        let target = stored_user("hank");
        let other = stored_user("alice");
        let target_id = target.id;

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .with(eq(target_id))
            .returning(move |_| Ok(Some(target.clone())));
        users
            .expect_get_by_username()
            .with(eq("alice"))
            .returning(move |_| Ok(Some(other.clone())));

        let result = service(users)
            .update_user(UpdateUser {
                id: Some(target_id),
                username: Some("alice".into()),
                roles: Some(vec![Role::Employee]),
                active: Some(true),
                password: None,
            })
            .await;

        assert!(matches!(result, Err(UserError::UsernameConflict)));
    }

    #[tokio::test]
    async fn update_allows_a_self_matching_username() {
        let target = stored_user("hank");
        let target_id = target.id;
        let lookup = target.clone();

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        users
            .expect_get_by_username()
            .returning(move |_| Ok(Some(lookup.clone())));
        users.expect_update().returning(Ok);

        let updated = service(users)
            .update_user(UpdateUser {
                id: Some(target_id),
                username: Some("hank".into()),
                roles: Some(vec![Role::Manager]),
                active: Some(false),
                password: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.roles, vec![Role::Manager]);
        assert!(!updated.active);
    }

    #[tokio::test]
    async fn update_without_password_keeps_the_old_hash() {
        let target = stored_user("hank");
        let target_id = target.id;
        let old_hash = target.password_hash.clone();

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        users.expect_get_by_username().returning(|_| Ok(None));
        users.expect_update().returning(Ok);

        let updated = service(users)
            .update_user(UpdateUser {
                id: Some(target_id),
                username: Some("hank2".into()),
                roles: Some(vec![Role::Employee]),
                active: Some(true),
                password: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.password_hash, old_hash);
    }

    #[tokio::test]
    async fn update_with_password_replaces_the_hash() {
        let target = stored_user("hank");
        let target_id = target.id;
        let old_hash = target.password_hash.clone();

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        users.expect_get_by_username().returning(|_| Ok(None));
        users.expect_update().returning(Ok);

        let updated = service(users)
            .update_user(UpdateUser {
                id: Some(target_id),
                username: Some("hank".into()),
                roles: Some(vec![Role::Employee]),
                active: Some(true),
                password: Some("fresh".into()),
            })
            .await
            .unwrap();

        assert_ne!(updated.password_hash, old_hash);
        assert!(verify_password("fresh", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn delete_requires_an_id() {
        let svc = service(MockUserRepository::new());

        let result = svc.delete_user(DeleteUser { id: None }).await;
        assert!(matches!(result, Err(UserError::MissingId)));
    }

    #[tokio::test]
    async fn delete_is_refused_while_notes_reference_the_user() {
        let id = Uuid::new_v4();
        // No user-store expectations: the note check must short-circuit.
        let svc = service_with_note(MockUserRepository::new(), id).await;

        let result = svc.delete_user(DeleteUser { id: Some(id) }).await;
        assert!(matches!(result, Err(UserError::HasAssignedNotes)));
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|_| Ok(None));

        let result = service(users)
            .delete_user(DeleteUser {
                id: Some(Uuid::new_v4()),
            })
            .await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let target = stored_user("hank");
        let target_id = target.id;

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        users
            .expect_delete()
            .with(eq(target_id))
            .returning(|_| Ok(true));

        let deleted = service(users)
            .delete_user(DeleteUser {
                id: Some(target_id),
            })
            .await
            .unwrap();

        assert_eq!(deleted.id, target_id);
        assert_eq!(deleted.username, "hank");
    }
}
