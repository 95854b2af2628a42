use chrono::{DateTime, Utc};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub type Role = String;

pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(Uuid);
impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Destination address on the messaging network. Syntactic validation is the
/// gateway's job; the store only treats it as an opaque unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);
impl PhoneNumber {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppContact {
    pub phone: PhoneNumber,
    pub opt_in: bool,
    pub last_msg_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    role: Role,
    whatsapp: WhatsAppContact,
    registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserId,
        username: String,
        role: Role,
        whatsapp: WhatsAppContact,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }

        Ok(Self {
            id,
            username,
            role,
            whatsapp,
            registered_at,
        })
    }

    /// Merge mutable profile fields, keeping the stored phone no matter what
    /// the caller supplied. The phone is the uniqueness key and immutable
    /// after creation.
    pub fn apply_profile_update(mut self, changes: ProfileUpdate) -> Result<Self, DomainError> {
        if changes.username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        self.username = changes.username;
        self.role = changes.role;
        self.whatsapp.opt_in = changes.opt_in;
        self.whatsapp.last_msg_id = changes.last_msg_id;
        Ok(self)
    }

    /// Remember the id of the latest notification delivered to this user.
    pub fn record_message(&mut self, msg_id: String) {
        self.whatsapp.last_msg_id = Some(msg_id);
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn role(&self) -> &str {
        &self.role
    }
    pub fn whatsapp(&self) -> &WhatsAppContact {
        &self.whatsapp
    }
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

/// Candidate record for registration. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub role: Role,
    pub phone: PhoneNumber,
    pub opt_in: bool,
}

impl NewUser {
    pub fn new(
        username: String,
        role: Option<Role>,
        phone: PhoneNumber,
        opt_in: bool,
    ) -> Result<Self, DomainError> {
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        Ok(Self {
            username,
            role: role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            phone,
            opt_in,
        })
    }
}

/// Caller-supplied profile changes. `phone` is carried only so the merge can
/// demonstrably discard it.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub role: Role,
    pub phone: Option<PhoneNumber>,
    pub opt_in: bool,
    pub last_msg_id: Option<String>,
}
