//! Event endpoints.
//!
//! | method | path          | who        |
//! |--------|---------------|------------|
//! | GET    | /events       | any member |
//! | POST   | /events       | senior     |
//! | DELETE | /events/{id}  | senior     |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use quorum_core::{entity::NewEvent, store::SocietyStore};
use uuid::Uuid;

use crate::{AppState, error::ApiError, session::CurrentUser};

/// Events, newest first.
pub async fn list<S, C>(
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
  Ok(Json(events))
}

pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Json(input): Json<NewEvent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let event = state
    .gateway
    .create_event(Some(&user.identity), input)
    .await?;
  Ok((StatusCode::CREATED, Json(event)))
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
  state.gateway.delete_event(Some(&user.identity), id).await?;
  Ok(StatusCode::NO_CONTENT)
}
