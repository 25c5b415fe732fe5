//! Login, logout, and the bearer-token session extractor.
//!
//! The login flow follows the order the core prescribes: the role/email
//! allow-list check runs first, and only then is the external credential
//! collaborator consulted. A successful login mirrors the identity into the
//! store's `users` collection so the attendance roster can join against it.
//!
//! Sessions are an in-memory map and do not survive a restart.

use std::collections::HashMap;
use std::sync::RwLock;

use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, StatusCode, header, request::Parts},
  response::IntoResponse,
};
use quorum_core::{
  identity::{CredentialVerifier, Identity},
  role::Role,
  store::SocietyStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Session registry ────────────────────────────────────────────────────────

/// In-memory token → identity map.
#[derive(Default)]
pub struct Sessions {
  inner: RwLock<HashMap<Uuid, Identity>>,
}

impl Sessions {
  /// Register `identity` and return its opaque bearer token.
  pub fn issue(&self, identity: Identity) -> Uuid {
    let token = Uuid::new_v4();
    self
      .inner
      .write()
      .expect("sessions lock poisoned")
      .insert(token, identity);
    token
  }

  pub fn get(&self, token: Uuid) -> Option<Identity> {
    self
      .inner
      .read()
      .expect("sessions lock poisoned")
      .get(&token)
      .cloned()
  }

  /// Drop a session; returns whether it existed.
  pub fn revoke(&self, token: Uuid) -> bool {
    self
      .inner
      .write()
      .expect("sessions lock poisoned")
      .remove(&token)
      .is_some()
  }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header. Present in a handler signature means the request carries a live
/// session.
pub struct CurrentUser {
  pub identity: Identity,
  pub token:    Uuid,
}

fn bearer_token(headers: &HeaderMap) -> Result<Uuid, ApiError> {
  let value = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthenticated)?;
  let token = value
    .strip_prefix("Bearer ")
    .ok_or(ApiError::Unauthenticated)?;
  Uuid::parse_str(token).map_err(|_| ApiError::Unauthenticated)
}

impl<S, C> FromRequestParts<AppState<S, C>> for CurrentUser
where
  S: Send + Sync,
  C: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, C>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)?;
    let identity =
      state.sessions.get(token).ok_or(ApiError::Unauthenticated)?;
    Ok(CurrentUser { identity, token })
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /session`.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub name:     String,
  pub email:    String,
  pub password: String,
  pub role:     Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token:    Uuid,
  pub identity: Identity,
}

/// `POST /session` — allow-list check, then external credential check.
pub async fn login<S, C>(
  State(state): State<AppState<S, C>>,
  Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: CredentialVerifier,
{
  // The allow-list is the first and only role check; the credential
  // collaborator is not consulted for emails it rejects.
  if !state.directory.authorizes(body.role, &body.email) {
    return Err(ApiError::Forbidden(format!(
      "email {:?} is not authorized for the {} role",
      body.email, body.role
    )));
  }

  let uid = state
    .verifier
    .authenticate(&body.email, &body.password)
    .await?;

  let identity = state
    .directory
    .resolve(&body.email, body.role, &body.name, uid)?;

  state
    .store
    .upsert_user(&identity)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let token = state.sessions.issue(identity.clone());
  Ok((StatusCode::CREATED, Json(LoginResponse { token, identity })))
}

/// `DELETE /session` — revoke the caller's token.
pub async fn logout<S, C>(
  State(state): State<AppState<S, C>>,
  user: CurrentUser,
) -> StatusCode
where
  S: Send + Sync,
  C: Send + Sync,
{
  state.sessions.revoke(user.token);
  StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::Request;
  use quorum_core::identity::RoleDirectory;
  use std::sync::Arc;

  // A minimal no-op store for testing the extractor only.
  struct NoopStore;

  impl SocietyStore for NoopStore {
    type Error = std::convert::Infallible;

    async fn upsert_user(
      &self,
      _: &Identity,
    ) -> Result<(), Self::Error> {
      Ok(())
    }
    async fn list_users(&self) -> Result<Vec<Identity>, Self::Error> {
      Ok(Vec::new())
    }
    async fn create_event(
      &self,
      _: quorum_core::entity::NewEvent,
      _: Uuid,
    ) -> Result<quorum_core::entity::Event, Self::Error> {
      unimplemented!()
    }
    async fn get_event(
      &self,
      _: Uuid,
    ) -> Result<Option<quorum_core::entity::Event>, Self::Error> {
      Ok(None)
    }
    async fn list_events(
      &self,
    ) -> Result<Vec<quorum_core::entity::Event>, Self::Error> {
      Ok(Vec::new())
    }
    async fn delete_event(&self, _: Uuid) -> Result<bool, Self::Error> {
      Ok(false)
    }
    async fn create_announcement(
      &self,
      _: quorum_core::entity::NewAnnouncement,
      _: Uuid,
    ) -> Result<quorum_core::entity::Announcement, Self::Error> {
      unimplemented!()
    }
    async fn list_announcements(
      &self,
    ) -> Result<Vec<quorum_core::entity::Announcement>, Self::Error> {
      Ok(Vec::new())
    }
    async fn delete_announcement(
      &self,
      _: Uuid,
    ) -> Result<bool, Self::Error> {
      Ok(false)
    }
    async fn create_task(
      &self,
      _: quorum_core::entity::NewTask,
      _: Uuid,
    ) -> Result<quorum_core::entity::Task, Self::Error> {
      unimplemented!()
    }
    async fn list_tasks(
      &self,
    ) -> Result<Vec<quorum_core::entity::Task>, Self::Error> {
      Ok(Vec::new())
    }
    async fn create_attendance(
      &self,
      _: quorum_core::entity::NewAttendance,
      _: Uuid,
    ) -> Result<quorum_core::entity::Attendance, Self::Error> {
      unimplemented!()
    }
    async fn list_attendance(
      &self,
      _: Uuid,
    ) -> Result<Vec<quorum_core::entity::Attendance>, Self::Error> {
      Ok(Vec::new())
    }
    async fn find_attendance(
      &self,
      _: Uuid,
      _: Uuid,
    ) -> Result<Option<quorum_core::entity::Attendance>, Self::Error> {
      Ok(None)
    }
    async fn create_resource(
      &self,
      _: quorum_core::entity::NewResource,
      _: Uuid,
    ) -> Result<quorum_core::entity::Resource, Self::Error> {
      unimplemented!()
    }
    async fn list_resources(
      &self,
    ) -> Result<Vec<quorum_core::entity::Resource>, Self::Error> {
      Ok(Vec::new())
    }
    async fn delete_resource(&self, _: Uuid) -> Result<bool, Self::Error> {
      Ok(false)
    }
    async fn create_feedback(
      &self,
      _: quorum_core::entity::NewFeedback,
      _: Uuid,
    ) -> Result<quorum_core::entity::Feedback, Self::Error> {
      unimplemented!()
    }
    async fn list_feedback(
      &self,
      _: Option<Uuid>,
    ) -> Result<Vec<quorum_core::entity::Feedback>, Self::Error> {
      Ok(Vec::new())
    }
  }

  struct NoopVerifier;

  impl CredentialVerifier for NoopVerifier {
    async fn authenticate(
      &self,
      email: &str,
      _password: &str,
    ) -> quorum_core::Result<Uuid> {
      Ok(Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()))
    }
  }

  fn make_state() -> AppState<NoopStore, NoopVerifier> {
    AppState::new(
      Arc::new(NoopStore),
      RoleDirectory::reference(),
      NoopVerifier,
    )
  }

  fn identity() -> Identity {
    Identity {
      uid:   Uuid::new_v4(),
      name:  "Sam".to_string(),
      email: "eb@society.com".to_string(),
      role:  Role::Eb,
    }
  }

  async fn extract(
    req: Request<axum::body::Body>,
    state: &AppState<NoopStore, NoopVerifier>,
  ) -> Result<CurrentUser, ApiError> {
    let (mut parts, _) = req.into_parts();
    CurrentUser::from_request_parts(&mut parts, state).await
  }

  #[tokio::test]
  async fn valid_token_resolves_identity() {
    let state = make_state();
    let token = state.sessions.issue(identity());

    let req = Request::builder()
      .header(header::AUTHORIZATION, format!("Bearer {token}"))
      .body(axum::body::Body::empty())
      .unwrap();

    let user = extract(req, &state).await.unwrap();
    assert_eq!(user.identity.role, Role::Eb);
    assert_eq!(user.token, token);
  }

  #[tokio::test]
  async fn missing_header_is_unauthenticated() {
    let state = make_state();
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthenticated)
    ));
  }

  #[tokio::test]
  async fn unknown_token_is_unauthenticated() {
    let state = make_state();
    let req = Request::builder()
      .header(header::AUTHORIZATION, format!("Bearer {}", Uuid::new_v4()))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthenticated)
    ));
  }

  #[tokio::test]
  async fn malformed_token_is_unauthenticated() {
    let state = make_state();
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Bearer not-a-uuid")
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthenticated)
    ));
  }

  #[tokio::test]
  async fn revoked_token_stops_working() {
    let state = make_state();
    let token = state.sessions.issue(identity());
    assert!(state.sessions.revoke(token));

    let req = Request::builder()
      .header(header::AUTHORIZATION, format!("Bearer {token}"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthenticated)
    ));
  }
}
