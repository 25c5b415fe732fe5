//! Resource library endpoints.
//!
//! | method | path            | who        |
//! |--------|-----------------|------------|
//! | GET    | /resources      | any member |
//! | POST   | /resources      | senior     |
//! | DELETE | /resources/{id} | senior     |
//!
//! The GET response is pre-partitioned into the four department shelves.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use quorum_core::{
  entity::NewResource, projection::department_shelves, store::SocietyStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError, session::CurrentUser};

pub async fn shelves<S, C>(
  State(state): State<AppState<S, C>>,
  _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let resources = state
    .store
    .list_resources()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(department_shelves(&resources)))
}

pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
  Json(input): Json<NewResource>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: Send + Sync,
{
  let resource = state
    .gateway
    .create_resource(Some(&user.identity), input)
    .await?;
  Ok((StatusCode::CREATED, Json(resource)))
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
    .delete_resource(Some(&user.identity), id)
    .await?;
  Ok(StatusCode::NO_CONTENT)
}
