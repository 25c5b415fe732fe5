//! Task endpoints.
//!
//! | method | path   | who        |
//! |--------|--------|------------|
//! | GET    | /tasks | any member |
//! | POST   | /tasks | senior     |
//!
//! Tasks cannot be deleted; they stay on the board even when the event
//! they reference is gone.

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use quorum_core::{
  entity::NewTask, projection::task_board, store::SocietyStore,
};

use crate::{AppState, error::ApiError, session::CurrentUser};

/// The three-column task board, grouped by stored status.
pub async fn board<S, C>(
  State(state): State<AppState<S, C>>,
  _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let tasks = state
    .store
    .list_tasks()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(task_board(tasks)))
}

pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Json(input): Json<NewTask>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let task = state
    .gateway
    .create_task(Some(&user.identity), input)
    .await?;
  Ok((StatusCode::CREATED, Json(task)))
}
