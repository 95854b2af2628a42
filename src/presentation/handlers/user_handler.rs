use std::sync::Arc;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::user::{DEFAULT_ROLE, PhoneNumber, ProfileUpdate, User, UserId},
        repositories::user_repository::UserRepository,
        services::notification_service::NotificationGateway,
    },
    presentation::handlers::error_response,
    usecase::{profile_usecase::ProfileUsecase, register_user_usecase::RegisterUserUsecase},
};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Request

/// json for the whatsapp block of register/update requests
#[derive(Serialize, Deserialize)]
pub struct WhatsAppPayload {
    pub phone: String,
    pub opt_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_msg_id: Option<String>,
}

/// json for register request
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    pub whatsapp: WhatsAppPayload,
}

/// json for profile update request; a supplied phone is ignored
#[derive(Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    pub whatsapp: WhatsAppPayload,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    #[serde(default)]
    pub userid: String,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: String,
    pub whatsapp: WhatsAppPayload,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            role: user.role().to_string(),
            whatsapp: WhatsAppPayload {
                phone: user.whatsapp().phone.as_str().to_string(),
                opt_in: user.whatsapp().opt_in,
                last_msg_id: user.whatsapp().last_msg_id.clone(),
            },
        }
    }
}

/// json for register response when the welcome notification failed
#[derive(Serialize, Deserialize)]
pub struct RegisterWarningResponse {
    pub user: UserResponse,
    pub warning: String,
}

/// json for login response
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub userid: String,
    pub role: String,
}

/* Router Function and Handler Function */

// User Router

/// function return Router object
/// Suppose to be nested by main router
pub fn create_user_router<
    R: UserRepository + Send + Sync + 'static + Clone,
    G: NotificationGateway + Send + Sync + 'static + Clone,
>(
    register_service: RegisterUserUsecase<R, G>,
    profile_service: ProfileUsecase<R>,
) -> Router {
    let state = UserState {
        register_service: Arc::new(register_service),
        profile_service: Arc::new(profile_service),
    };

    Router::new()
        .route("/registration/", post(register::<R, G>))
        .route("/data/", get(get_user::<R, G>).post(update_user::<R, G>))
        .route("/login/", get(login::<R, G>))
        .route("/all/", get(list_users::<R, G>))
        .with_state(state)
}

#[derive(Clone)]
pub struct UserState<R: UserRepository, G: NotificationGateway> {
    pub register_service: Arc<RegisterUserUsecase<R, G>>,
    pub profile_service: Arc<ProfileUsecase<R>>,
}

/// The query string must carry a non-empty userid; anything that is not a
/// UUID cannot name a record and reads as a miss.
fn parse_userid(raw: &str) -> Result<UserId, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::MissingUserId);
    }
    Uuid::parse_str(raw)
        .map(UserId::from_uuid)
        .map_err(|_| RepositoryError::NotFound.into())
}

// handler function

/// handler function for registration
async fn register<
    R: UserRepository + Send + Sync,
    G: NotificationGateway + Send + Sync,
>(
    State(state): State<UserState<R, G>>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    match state
        .register_service
        .register(
            payload.username,
            payload.role,
            PhoneNumber::new(payload.whatsapp.phone),
            payload.whatsapp.opt_in,
        )
        .await
    {
        Ok(outcome) => match outcome.warning {
            None => (StatusCode::CREATED, Json(UserResponse::from(outcome.user))).into_response(),
            Some(warning) => (
                StatusCode::CREATED,
                Json(RegisterWarningResponse {
                    user: outcome.user.into(),
                    warning,
                }),
            )
                .into_response(),
        },
        Err(e) => error_response(e),
    }
}

/// handler function for fetching a profile
async fn get_user<
    R: UserRepository + Send + Sync,
    G: NotificationGateway + Send + Sync,
>(
    State(state): State<UserState<R, G>>,
    Query(query): Query<UserIdQuery>,
) -> Response {
    let id = match parse_userid(&query.userid) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    match state.profile_service.get_user(&id).await {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(e) => error_response(e),
    }
}

/// handler function for updating a profile
async fn update_user<
    R: UserRepository + Send + Sync,
    G: NotificationGateway + Send + Sync,
>(
    State(state): State<UserState<R, G>>,
    Query(query): Query<UserIdQuery>,
    Json(payload): Json<UpdateUserRequest>,
) -> Response {
    let id = match parse_userid(&query.userid) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    let changes = ProfileUpdate {
        username: payload.username,
        role: payload.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        phone: Some(PhoneNumber::new(payload.whatsapp.phone)),
        opt_in: payload.whatsapp.opt_in,
        last_msg_id: payload.whatsapp.last_msg_id,
    };

    match state.profile_service.update_profile(&id, changes).await {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(e) => error_response(e),
    }
}

/// handler function for login: a role lookup keyed by userid
async fn login<
    R: UserRepository + Send + Sync,
    G: NotificationGateway + Send + Sync,
>(
    State(state): State<UserState<R, G>>,
    Query(query): Query<UserIdQuery>,
) -> Response {
    let id = match parse_userid(&query.userid) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    match state.profile_service.get_user(&id).await {
        Ok(user) => (
            StatusCode::OK,
            Json(LoginResponse {
                userid: user.id().to_string(),
                role: user.role().to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// handler function for listing every registered user
async fn list_users<
    R: UserRepository + Send + Sync,
    G: NotificationGateway + Send + Sync,
>(
    State(state): State<UserState<R, G>>,
) -> Response {
    match state.profile_service.list_users().await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(e) => error_response(e),
    }
}
