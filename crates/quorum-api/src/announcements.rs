//! Announcement endpoints.
//!
//! | method | path                | who        |
//! |--------|---------------------|------------|
//! | GET    | /announcements      | any member |
//! | POST   | /announcements      | senior     |
//! | DELETE | /announcements/{id} | senior     |
//!
//! The GET response is priority-ranked, not raw store order.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use quorum_core::{
  entity::NewAnnouncement, projection::rank_announcements,
  store::SocietyStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError, session::CurrentUser};

/// Announcements ranked by priority, recency breaking ties.
pub async fn list<S, C>(
  State(state): State<AppState<S, C>>,
  _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let announcements = state
    .store
    .list_announcements()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rank_announcements(announcements)))
}

pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Json(input): Json<NewAnnouncement>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let announcement = state
    .gateway
    .create_announcement(Some(&user.identity), input)
    .await?;
  Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn delete_one<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  state
    .gateway
    .delete_announcement(Some(&user.identity), id)
    .await?;
  Ok(StatusCode::NO_CONTENT)
}
