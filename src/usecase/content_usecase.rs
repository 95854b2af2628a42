use crate::domain::{
    error::DomainError,
    models::content::{ContentKind, ContentRecord},
    repositories::content_repository::ContentRepository,
};

pub struct ContentUsecase<C: ContentRepository> {
    content_repository: C,
}

impl<C: ContentRepository> ContentUsecase<C> {
    pub fn new(content_repository: C) -> Self {
        Self { content_repository }
    }

    pub async fn publish(&self, kind: ContentKind, record: ContentRecord) -> Result<(), DomainError>
    where
        C: Send + Sync,
    {
        Ok(self.content_repository.upsert(kind, record).await?)
    }

    pub async fn latest(&self, kind: ContentKind) -> Result<ContentRecord, DomainError>
    where
        C: Send + Sync,
    {
        Ok(self.content_repository.latest(kind).await?)
    }
}
