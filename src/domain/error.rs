use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Empty username")]
    EmptyUsername,

    #[error("Invalid WhatsApp number")]
    InvalidPhone,

    #[error("User ID is required")]
    MissingUserId,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Phone number already registered")]
    DuplicatePhone,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Failure to hand a message off to the messaging network. Never fails a
/// request on its own; the registration workflow downgrades it to a warning.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Send failed: {0}")]
    Send(String),
}
