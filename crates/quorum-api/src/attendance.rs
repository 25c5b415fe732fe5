//! Attendance endpoints.
//!
//! | method | path               | who    |
//! |--------|--------------------|--------|
//! | POST   | /attendance        | senior |
//! | GET    | /attendance/roster | senior |
//!
//! The roster view is the one read surface that is role-gated: juniors
//! never see who was marked absent.

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use quorum_core::{
  entity::NewAttendance,
  gateway::Gateway,
  policy::EntityKind,
  projection::roster,
  store::SocietyStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError, session::CurrentUser};

pub async fn mark<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Json(input): Json<NewAttendance>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let record = state
    .gateway
    .create_attendance(Some(&user.identity), input)
    .await?;
  Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
  pub event_id: Uuid,
}

/// Every known user joined with their record for the queried event.
pub async fn roster_view<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Query(query): Query<RosterQuery>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  Gateway::<S>::ensure_view(Some(&user.identity), EntityKind::Attendance)?;

  let (users, attendance) = tokio::join!(
    state.store.list_users(),
    state.store.list_attendance(query.event_id),
  );
  let users = users.map_err(|e| ApiError::Store(Box::new(e)))?;
  let attendance = attendance.map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(roster(&users, &attendance, query.event_id)))
}
