//! The argon2-backed credential collaborator.
//!
//! Passwords live in `config.toml` as PHC strings, one per email. The uid
//! returned on success is derived from the lower-cased email, so the same
//! person maps to the same user row across logins and restarts.

use std::collections::HashMap;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use quorum_core::{Error, Result, identity::CredentialVerifier};
use uuid::Uuid;

pub struct ArgonCredentials {
  hashes: HashMap<String, String>,
}

impl ArgonCredentials {
  /// `credentials` maps email → argon2 PHC string.
  pub fn new(credentials: HashMap<String, String>) -> Self {
    let hashes = credentials
      .into_iter()
      .map(|(email, hash)| (email.to_lowercase(), hash))
      .collect();
    Self { hashes }
  }
}

/// Durable uid for an email, stable across logins.
pub fn uid_for_email(email: &str) -> Uuid {
  Uuid::new_v5(&Uuid::NAMESPACE_OID, email.to_lowercase().as_bytes())
}

impl CredentialVerifier for ArgonCredentials {
  async fn authenticate(&self, email: &str, password: &str) -> Result<Uuid> {
    let key = email.to_lowercase();
    let phc = self
      .hashes
      .get(&key)
      .ok_or_else(|| Error::CredentialsRejected(email.to_string()))?;
    let parsed = PasswordHash::new(phc)
      .map_err(|_| Error::CredentialsRejected(email.to_string()))?;
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .map_err(|_| Error::CredentialsRejected(email.to_string()))?;
    Ok(uid_for_email(&key))
  }
}
