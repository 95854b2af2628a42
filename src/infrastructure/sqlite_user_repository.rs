use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, SqlErr,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, PhoneNumber, ProfileUpdate, User, UserId, WhatsAppContact},
    repositories::user_repository::UserRepository,
};
use crate::infrastructure::entities::users;

#[derive(Clone)]
pub struct SqliteUserRepository {
    db: DatabaseConnection,
}

impl SqliteUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: users::Model) -> Result<User, RepositoryError> {
    let whatsapp = WhatsAppContact {
        phone: PhoneNumber::new(model.whatsapp_phone),
        opt_in: model.whatsapp_opt_in,
        last_msg_id: model.whatsapp_last_msg_id,
    };
    User::new(
        UserId::from_uuid(model.id),
        model.username,
        model.role,
        whatsapp,
        model.registered_at,
    )
    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        // Fast path for the friendlier error; the UNIQUE constraint on
        // whatsapp_phone decides the race.
        let already = users::Entity::find()
            .filter(users::Column::WhatsappPhone.eq(new_user.phone.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if already > 0 {
            return Err(RepositoryError::DuplicatePhone);
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let user_model = users::ActiveModel {
            id: Set(id),
            username: Set(new_user.username.clone()),
            role: Set(new_user.role.clone()),
            whatsapp_phone: Set(new_user.phone.as_str().to_string()),
            whatsapp_opt_in: Set(new_user.opt_in),
            whatsapp_last_msg_id: Set(None),
            registered_at: Set(now),
        };
        users::Entity::insert(user_model)
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::DuplicatePhone,
                _ => RepositoryError::DatabaseError(e.to_string()),
            })?;

        let whatsapp = WhatsAppContact {
            phone: new_user.phone,
            opt_in: new_user.opt_in,
            last_msg_id: None,
        };
        User::new(
            UserId::from_uuid(id),
            new_user.username,
            new_user.role,
            whatsapp,
            now,
        )
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let user = users::Entity::find_by_id(*id.as_uuid())
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        match user {
            Some(model) => Ok(Some(to_domain(model)?)),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let models = users::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn update_user(
        &self,
        id: &UserId,
        changes: ProfileUpdate,
    ) -> Result<User, RepositoryError> {
        let model = users::Entity::find_by_id(*id.as_uuid())
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        let current = to_domain(model)?;
        if changes
            .phone
            .as_ref()
            .is_some_and(|phone| *phone != current.whatsapp().phone)
        {
            debug!(user_id = %id, "ignoring attempt to change registered phone");
        }
        let updated = current
            .apply_profile_update(changes)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // The phone written here is the stored one: apply_profile_update
        // discards whatever the caller supplied.
        let user_model = users::ActiveModel {
            id: Set(*updated.id().as_uuid()),
            username: Set(updated.username().to_string()),
            role: Set(updated.role().to_string()),
            whatsapp_phone: Set(updated.whatsapp().phone.as_str().to_string()),
            whatsapp_opt_in: Set(updated.whatsapp().opt_in),
            whatsapp_last_msg_id: Set(updated.whatsapp().last_msg_id.clone()),
            registered_at: Set(updated.registered_at()),
        };
        let model = users::Entity::update(user_model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        to_domain(model)
    }

    async fn record_last_message(
        &self,
        id: &UserId,
        msg_id: &str,
    ) -> Result<(), RepositoryError> {
        let user_model = users::ActiveModel {
            id: Set(*id.as_uuid()),
            whatsapp_last_msg_id: Set(Some(msg_id.to_string())),
            ..Default::default()
        };
        users::Entity::update(user_model)
            .exec(&self.db)
            .await
            .map(|_| ())
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepositoryError::NotFound,
                _ => RepositoryError::DatabaseError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::schema;
    use sea_orm::{ConnectOptions, Database};

    async fn repo() -> SqliteUserRepository {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.unwrap();
        schema::init_schema(&db).await.unwrap();
        SqliteUserRepository::new(db)
    }

    fn candidate(username: &str, phone: &str) -> NewUser {
        NewUser::new(
            username.to_string(),
            None,
            PhoneNumber::new(phone.to_string()),
            true,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let repo = repo().await;
        let created = repo
            .create_user(candidate("alice", "+15551234567"))
            .await
            .unwrap();

        let found = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(found.username(), "alice");
        assert_eq!(found.role(), "user");
        assert_eq!(found.whatsapp().phone.as_str(), "+15551234567");
        assert!(found.whatsapp().opt_in);
        assert!(found.whatsapp().last_msg_id.is_none());
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected_with_one_row_kept() {
        let repo = repo().await;
        repo.create_user(candidate("alice", "+15550000000"))
            .await
            .unwrap();

        let second = repo.create_user(candidate("bob", "+15550000000")).await;
        assert!(matches!(second, Err(RepositoryError::DuplicatePhone)));

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username(), "alice");
    }

    #[tokio::test]
    async fn concurrent_duplicate_registrations_leave_exactly_one_row() {
        let repo = repo().await;
        let (a, b) = tokio::join!(
            repo.create_user(candidate("alice", "+15550000000")),
            repo.create_user(candidate("bob", "+15550000000")),
        );

        assert!(a.is_ok() != b.is_ok(), "exactly one registration must win");
        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(loser, Err(RepositoryError::DuplicatePhone)));

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn update_discards_caller_supplied_phone() {
        let repo = repo().await;
        let created = repo
            .create_user(candidate("alice", "+15551234567"))
            .await
            .unwrap();

        let updated = repo
            .update_user(
                created.id(),
                ProfileUpdate {
                    username: "alice2".to_string(),
                    role: "admin".to_string(),
                    phone: Some(PhoneNumber::new("+19998887777".to_string())),
                    opt_in: false,
                    last_msg_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.whatsapp().phone.as_str(), "+15551234567");

        let stored = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(stored.whatsapp().phone.as_str(), "+15551234567");
        assert_eq!(stored.username(), "alice2");
        assert_eq!(stored.role(), "admin");
    }

    #[tokio::test]
    async fn update_of_unknown_user_is_not_found() {
        let repo = repo().await;
        let result = repo
            .update_user(
                &UserId::new(),
                ProfileUpdate {
                    username: "ghost".to_string(),
                    role: "user".to_string(),
                    phone: None,
                    opt_in: false,
                    last_msg_id: None,
                },
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn record_last_message_persists_the_id() {
        let repo = repo().await;
        let created = repo
            .create_user(candidate("alice", "+15551234567"))
            .await
            .unwrap();

        repo.record_last_message(created.id(), "wamid.TEST1")
            .await
            .unwrap();

        let stored = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(stored.whatsapp().last_msg_id.as_deref(), Some("wamid.TEST1"));
    }
}
