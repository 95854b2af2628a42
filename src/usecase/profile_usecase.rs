use crate::domain::{
    error::{DomainError, RepositoryError},
    models::user::{ProfileUpdate, User, UserId},
    repositories::user_repository::UserRepository,
};

pub struct ProfileUsecase<R: UserRepository> {
    user_repository: R,
}

impl<R: UserRepository> ProfileUsecase<R> {
    pub fn new(user_repository: R) -> Self {
        Self { user_repository }
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User, DomainError>
    where
        R: Send + Sync,
    {
        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError>
    where
        R: Send + Sync,
    {
        Ok(self.user_repository.list_users().await?)
    }

    pub async fn update_profile(
        &self,
        id: &UserId,
        changes: ProfileUpdate,
    ) -> Result<User, DomainError>
    where
        R: Send + Sync,
    {
        if changes.username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        Ok(self.user_repository.update_user(id, changes).await?)
    }
}
