//! Error types for `quorum-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::{
  policy::{EntityKind, Operation},
  role::Role,
};

#[derive(Debug, Error)]
pub enum Error {
  /// The email is not on the allow-list for the requested role.
  #[error("email {email:?} is not authorized for the {role} role")]
  UnauthorizedEmail { email: String, role: Role },

  /// The external credential collaborator rejected the password.
  #[error("credentials rejected for {0:?}")]
  CredentialsRejected(String),

  /// A mutation was attempted without a session identity.
  #[error("not authenticated")]
  Unauthenticated,

  /// The authorization policy denied the operation.
  #[error("role {role} may not {operation} {entity}")]
  Forbidden {
    role:      Role,
    entity:    EntityKind,
    operation: Operation,
  },

  /// The payload failed schema validation.
  #[error("invalid payload: {0}")]
  InvalidPayload(String),

  /// A referenced id does not resolve, e.g. a stale `event_id`.
  #[error("{entity} {id} not found")]
  NotFound { entity: EntityKind, id: Uuid },

  /// The store collaborator failed; never retried.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error for surfacing through the gateway.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
