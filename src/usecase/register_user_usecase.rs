use tracing::warn;

use crate::domain::{
    error::DomainError,
    models::user::{NewUser, PhoneNumber, Role, User},
    repositories::user_repository::UserRepository,
    services::notification_service::NotificationGateway,
};

fn welcome_message(username: &str) -> String {
    format!("Hello {username}! Thanks for registering.")
}

#[derive(Debug)]
pub struct RegistrationOutcome {
    pub user: User,
    /// Set when the user was created but the welcome notification failed.
    pub warning: Option<String>,
}

pub struct RegisterUserUsecase<R: UserRepository, G: NotificationGateway> {
    user_repository: R,
    gateway: G,
}

impl<R: UserRepository, G: NotificationGateway> RegisterUserUsecase<R, G> {
    pub fn new(user_repository: R, gateway: G) -> Self {
        Self {
            user_repository,
            gateway,
        }
    }

    /// Create the durable user record first, then attempt the best-effort
    /// welcome notification. A failed send downgrades to a warning; the
    /// created record is never rolled back.
    pub async fn register(
        &self,
        username: String,
        role: Option<Role>,
        phone: PhoneNumber,
        opt_in: bool,
    ) -> Result<RegistrationOutcome, DomainError>
    where
        R: Send + Sync,
        G: Send + Sync,
    {
        let new_user = NewUser::new(username, role, phone, opt_in)?;
        if !self.gateway.validate_phone(&new_user.phone) {
            return Err(DomainError::InvalidPhone);
        }

        let mut user = self.user_repository.create_user(new_user).await?;

        let mut warning = None;
        if user.whatsapp().opt_in {
            let message = welcome_message(user.username());
            match self
                .gateway
                .send_message(&user.whatsapp().phone, &message)
                .await
            {
                Ok(msg_id) => {
                    // Best effort: the registration already succeeded.
                    if let Err(e) = self
                        .user_repository
                        .record_last_message(user.id(), &msg_id)
                        .await
                    {
                        warn!(user_id = %user.id(), error = %e, "failed to persist last message id");
                    }
                    user.record_message(msg_id);
                }
                Err(e) => {
                    warn!(user_id = %user.id(), error = %e, "welcome notification failed");
                    warning = Some(format!("WhatsApp message failed: {e}"));
                }
            }
        }

        Ok(RegistrationOutcome { user, warning })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_message_addresses_the_user() {
        assert_eq!(
            welcome_message("alice"),
            "Hello alice! Thanks for registering."
        );
    }
}
