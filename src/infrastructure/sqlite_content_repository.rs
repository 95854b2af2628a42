use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::{
    error::RepositoryError,
    models::content::{ContentKind, ContentRecord},
    repositories::content_repository::ContentRepository,
};

/// One implementation for news, competitions and schedule; the kind supplies
/// the table and column names, the values stay parameterized.
#[derive(Clone)]
pub struct SqliteContentRepository {
    db: DatabaseConnection,
}

impl SqliteContentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    async fn upsert(
        &self,
        kind: ContentKind,
        record: ContentRecord,
    ) -> Result<(), RepositoryError> {
        let sql = format!(
            "INSERT INTO {table} ({key}, {value}) VALUES (?, ?) \
             ON CONFLICT({key}) DO UPDATE SET {value} = excluded.{value}",
            table = kind.table(),
            key = kind.key_column(),
            value = kind.value_column(),
        );
        self.db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                sql,
                [record.key.into(), record.value.into()],
            ))
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn latest(&self, kind: ContentKind) -> Result<ContentRecord, RepositoryError> {
        let sql = format!(
            "SELECT {key} AS entry_key, {value} AS entry_value FROM {table} \
             ORDER BY id DESC LIMIT 1",
            table = kind.table(),
            key = kind.key_column(),
            value = kind.value_column(),
        );
        let row = self
            .db
            .query_one(Statement::from_string(self.db.get_database_backend(), sql))
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        let key: String = row
            .try_get("", "entry_key")
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        let value: String = row
            .try_get("", "entry_value")
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(ContentRecord::new(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::schema;
    use sea_orm::{ConnectOptions, Database};

    async fn repo() -> SqliteContentRepository {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.unwrap();
        schema::init_schema(&db).await.unwrap();
        SqliteContentRepository::new(db)
    }

    #[tokio::test]
    async fn empty_slot_reports_not_found() {
        let repo = repo().await;
        let result = repo.latest(ContentKind::News).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn upsert_of_existing_key_replaces_the_value() {
        let repo = repo().await;
        repo.upsert(
            ContentKind::News,
            ContentRecord::new("Season opener".to_string(), "old text".to_string()),
        )
        .await
        .unwrap();
        repo.upsert(
            ContentKind::News,
            ContentRecord::new("Season opener".to_string(), "new text".to_string()),
        )
        .await
        .unwrap();

        let latest = repo.latest(ContentKind::News).await.unwrap();
        assert_eq!(latest.key, "Season opener");
        assert_eq!(latest.value, "new text");
    }

    #[tokio::test]
    async fn latest_returns_the_most_recent_insertion() {
        let repo = repo().await;
        repo.upsert(
            ContentKind::Schedule,
            ContentRecord::new("Training".to_string(), "Mon 18:00".to_string()),
        )
        .await
        .unwrap();
        repo.upsert(
            ContentKind::Schedule,
            ContentRecord::new("Match day".to_string(), "Sat 14:00".to_string()),
        )
        .await
        .unwrap();

        let latest = repo.latest(ContentKind::Schedule).await.unwrap();
        assert_eq!(latest.key, "Match day");
    }

    #[tokio::test]
    async fn kinds_do_not_bleed_into_each_other() {
        let repo = repo().await;
        repo.upsert(
            ContentKind::Competitions,
            ContentRecord::new("Regional cup".to_string(), "2026-09-12".to_string()),
        )
        .await
        .unwrap();

        assert!(repo.latest(ContentKind::News).await.is_err());
        let latest = repo.latest(ContentKind::Competitions).await.unwrap();
        assert_eq!(latest.value, "2026-09-12");
    }
}
