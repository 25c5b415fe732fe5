//! Feedback endpoints.
//!
//! | method | path                   | who        |
//! |--------|------------------------|------------|
//! | GET    | /feedback[?event_id=]  | any member |
//! | POST   | /feedback              | any member |
//! | GET    | /feedback/events       | any member |
//!
//! Feedback is the one entity every role may create. Submissions must
//! reference a live event; the overview tolerates events deleted later.

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use quorum_core::{
  entity::NewFeedback,
  projection::{feedback_overview, reviewable_events},
  store::SocietyStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError, session::CurrentUser};

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
  pub event_id: Option<Uuid>,
}

/// All feedback (optionally for one event) with event titles resolved where
/// the event still exists.
pub async fn overview<S, C>(
  State(state): State<AppState<S, C>>,
  _user: CurrentUser,
  Query(query): Query<OverviewQuery>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let (feedback, events) = tokio::join!(
    state.store.list_feedback(query.event_id),
    state.store.list_events()
  );
  let feedback = feedback.map_err(|e| ApiError::Store(Box::new(e)))?;
  let events = events.map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(feedback_overview(&feedback, &events)))
}

/// Events offered for review, most recent first.
pub async fn reviewable<S, C>(
  State(state): State<AppState<S, C>>,
  _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let events = state
    .store
    .list_events()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(reviewable_events(events)))
}

pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Json(input): Json<NewFeedback>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let feedback = state
    .gateway
    .create_feedback(Some(&user.identity), input)
    .await?;
  Ok((StatusCode::CREATED, Json(feedback)))
}
