use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::content::{ContentKind, ContentRecord},
        repositories::content_repository::ContentRepository,
    },
    presentation::handlers::{MessageBody, error_response},
    usecase::content_usecase::ContentUsecase,
};

// Request / Response — each content kind keeps its original field names on
// the wire while sharing one keyed-upsert store underneath.

#[derive(Serialize, Deserialize)]
pub struct NewsPayload {
    pub title: String,
    pub content: String,
}

impl From<ContentRecord> for NewsPayload {
    fn from(record: ContentRecord) -> Self {
        Self {
            title: record.key,
            content: record.value,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct CompetitionPayload {
    pub name: String,
    pub date: String,
}

impl From<ContentRecord> for CompetitionPayload {
    fn from(record: ContentRecord) -> Self {
        Self {
            name: record.key,
            date: record.value,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct SchedulePayload {
    pub event: String,
    pub time: String,
}

impl From<ContentRecord> for SchedulePayload {
    fn from(record: ContentRecord) -> Self {
        Self {
            event: record.key,
            time: record.value,
        }
    }
}

#[derive(Clone)]
pub struct ContentState<C: ContentRepository> {
    pub content_service: Arc<ContentUsecase<C>>,
}

impl<C: ContentRepository> ContentState<C> {
    pub fn new(content_service: ContentUsecase<C>) -> Self {
        Self {
            content_service: Arc::new(content_service),
        }
    }
}

/// Router for the /main group (news + competitions).
pub fn create_main_router<C: ContentRepository + Send + Sync + 'static + Clone>(
    state: ContentState<C>,
) -> Router {
    Router::new()
        .route("/news/", post(update_news::<C>).get(get_news::<C>))
        .route(
            "/competitions/",
            post(update_competition::<C>).get(get_competition::<C>),
        )
        .with_state(state)
}

/// Router for the /schedule group.
pub fn create_schedule_router<C: ContentRepository + Send + Sync + 'static + Clone>(
    state: ContentState<C>,
) -> Router {
    Router::new()
        .route("/", post(update_schedule::<C>).get(get_schedule::<C>))
        .with_state(state)
}

// handler function

async fn update_news<C: ContentRepository + Send + Sync>(
    State(state): State<ContentState<C>>,
    Json(payload): Json<NewsPayload>,
) -> Response {
    match state
        .content_service
        .publish(
            ContentKind::News,
            ContentRecord::new(payload.title, payload.content),
        )
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageBody {
                message: "News updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_news<C: ContentRepository + Send + Sync>(
    State(state): State<ContentState<C>>,
) -> Response {
    match state.content_service.latest(ContentKind::News).await {
        Ok(record) => (StatusCode::OK, Json(NewsPayload::from(record))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn update_competition<C: ContentRepository + Send + Sync>(
    State(state): State<ContentState<C>>,
    Json(payload): Json<CompetitionPayload>,
) -> Response {
    match state
        .content_service
        .publish(
            ContentKind::Competitions,
            ContentRecord::new(payload.name, payload.date),
        )
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageBody {
                message: "Competition info updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_competition<C: ContentRepository + Send + Sync>(
    State(state): State<ContentState<C>>,
) -> Response {
    match state.content_service.latest(ContentKind::Competitions).await {
        Ok(record) => (StatusCode::OK, Json(CompetitionPayload::from(record))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn update_schedule<C: ContentRepository + Send + Sync>(
    State(state): State<ContentState<C>>,
    Json(payload): Json<SchedulePayload>,
) -> Response {
    match state
        .content_service
        .publish(
            ContentKind::Schedule,
            ContentRecord::new(payload.event, payload.time),
        )
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageBody {
                message: "Schedule updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_schedule<C: ContentRepository + Send + Sync>(
    State(state): State<ContentState<C>>,
) -> Response {
    match state.content_service.latest(ContentKind::Schedule).await {
        Ok(record) => (StatusCode::OK, Json(SchedulePayload::from(record))).into_response(),
        Err(e) => error_response(e),
    }
}
