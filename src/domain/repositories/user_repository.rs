use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, ProfileUpdate, User, UserId},
};
use async_trait::async_trait;

/// Durable store of user records. The phone uniqueness guarantee lives here:
/// `create_user` must behave as a single atomic decision, so two concurrent
/// calls with the same phone cannot both succeed.
#[async_trait]
pub trait UserRepository {
    /// Assign a fresh id and insert. Returns `DuplicatePhone` when the phone
    /// is already registered.
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;

    /// Apply mutable profile fields. The stored phone always wins over any
    /// caller-supplied value.
    async fn update_user(
        &self,
        id: &UserId,
        changes: ProfileUpdate,
    ) -> Result<User, RepositoryError>;

    /// Persist the id of the most recent notification sent to this user.
    async fn record_last_message(
        &self,
        id: &UserId,
        msg_id: &str,
    ) -> Result<(), RepositoryError>;
}
