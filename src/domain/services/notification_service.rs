use async_trait::async_trait;

use crate::domain::{error::DeliveryError, models::user::PhoneNumber};

pub type MessageId = String;

/// External messaging capability. Validation is syntactic only; a send is
/// fire-and-forget with no confirmation beyond the hand-off.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Whether the phone is well-formed for the network's addressing scheme.
    /// Says nothing about deliverability.
    fn validate_phone(&self, phone: &PhoneNumber) -> bool;

    async fn send_message(
        &self,
        phone: &PhoneNumber,
        text: &str,
    ) -> Result<MessageId, DeliveryError>;
}
