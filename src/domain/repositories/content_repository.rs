use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::content::{ContentKind, ContentRecord},
};

/// Keyed-upsert store backing the news/competitions/schedule slots. One
/// implementation serves all kinds; the kind selects the table.
#[async_trait]
pub trait ContentRepository {
    /// Insert the record, or replace the value when the key already exists.
    async fn upsert(&self, kind: ContentKind, record: ContentRecord)
    -> Result<(), RepositoryError>;

    /// The most recently inserted record for this kind, or `NotFound` when
    /// the slot has never been written.
    async fn latest(&self, kind: ContentKind) -> Result<ContentRecord, RepositoryError>;
}
