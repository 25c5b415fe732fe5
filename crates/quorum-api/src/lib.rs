//! JSON REST API for the Quorum society organiser.
//!
//! Exposes an axum [`Router`] backed by any
//! [`quorum_core::store::SocietyStore`] and any
//! [`quorum_core::identity::CredentialVerifier`]. Every mutation passes
//! through the [`quorum_core::gateway::Gateway`], so the authorization
//! policy is enforced on this trusted boundary rather than in the client.
//!
//! TLS and transport concerns are the caller's responsibility.

pub mod announcements;
pub mod attendance;
pub mod error;
pub mod events;
pub mod feedback;
pub mod resources;
pub mod session;
pub mod tasks;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use quorum_core::{
  gateway::Gateway,
  identity::{CredentialVerifier, RoleDirectory},
  store::SocietyStore,
};

pub use error::ApiError;
use session::Sessions;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, C> {
  pub store:     Arc<S>,
  pub gateway:   Gateway<S>,
  pub directory: Arc<RoleDirectory>,
  pub verifier:  Arc<C>,
  pub sessions:  Arc<Sessions>,
}

impl<S, C> Clone for AppState<S, C> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      gateway:   self.gateway.clone(),
      directory: Arc::clone(&self.directory),
      verifier:  Arc::clone(&self.verifier),
      sessions:  Arc::clone(&self.sessions),
    }
  }
}

impl<S: SocietyStore, C> AppState<S, C> {
  pub fn new(store: Arc<S>, directory: RoleDirectory, verifier: C) -> Self {
    Self {
      gateway:   Gateway::new(Arc::clone(&store)),
      store,
      directory: Arc::new(directory),
      verifier:  Arc::new(verifier),
      sessions:  Arc::new(Sessions::default()),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C>(state: AppState<S, C>) -> Router<()>
where
  S: SocietyStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: CredentialVerifier + 'static,
{
  Router::new()
    // Session
    .route(
      "/session",
      post(session::login::<S, C>).delete(session::logout::<S, C>),
    )
    // Events
    .route(
      "/events",
      get(events::list::<S, C>).post(events::create::<S, C>),
    )
    .route("/events/{id}", delete(events::delete_one::<S, C>))
    // Announcements
    .route(
      "/announcements",
      get(announcements::list::<S, C>).post(announcements::create::<S, C>),
    )
    .route(
      "/announcements/{id}",
      delete(announcements::delete_one::<S, C>),
    )
    // Tasks
    .route("/tasks", get(tasks::board::<S, C>).post(tasks::create::<S, C>))
    // Attendance
    .route("/attendance", post(attendance::mark::<S, C>))
    .route("/attendance/roster", get(attendance::roster_view::<S, C>))
    // Resources
    .route(
      "/resources",
      get(resources::shelves::<S, C>).post(resources::create::<S, C>),
    )
    .route("/resources/{id}", delete(resources::delete_one::<S, C>))
    // Feedback
    .route(
      "/feedback",
      get(feedback::overview::<S, C>).post(feedback::create::<S, C>),
    )
    .route("/feedback/events", get(feedback::reviewable::<S, C>))
    .with_state(state)
}
