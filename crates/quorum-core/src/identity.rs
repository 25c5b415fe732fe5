//! Identity resolution against the role allow-list.
//!
//! The directory maps each role to the set of emails allowed to assume it.
//! It is supplied by the host (configuration file, environment), not
//! compiled in; [`RoleDirectory::reference`] mirrors the society's reference
//! configuration for defaults and tests.
//!
//! The allow-list check is the only authentication performed here. Password
//! verification belongs to the external [`CredentialVerifier`] collaborator
//! and is invoked by the host only after the allow-list check passes.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, role::Role};

// ─── Identity ────────────────────────────────────────────────────────────────

/// A resolved session identity. Constructed fresh at every login from the
/// user-entered display name; `uid` comes from the credential collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub uid:   Uuid,
  pub name:  String,
  pub email: String,
  pub role:  Role,
}

// ─── Directory ───────────────────────────────────────────────────────────────

/// The role → authorized-emails allow-list. Emails are held lower-cased;
/// lookups lower-case their input, so the check is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDirectory {
  emails: HashMap<Role, HashSet<String>>,
}

impl RoleDirectory {
  /// Build a directory from an externally supplied mapping.
  pub fn new<I, S>(entries: I) -> Self
  where
    I: IntoIterator<Item = (Role, Vec<S>)>,
    S: Into<String>,
  {
    let emails = entries
      .into_iter()
      .map(|(role, list)| {
        let set = list
          .into_iter()
          .map(|e| e.into().to_lowercase())
          .collect::<HashSet<_>>();
        (role, set)
      })
      .collect();
    Self { emails }
  }

  /// The reference configuration: three authorized emails per role.
  pub fn reference() -> Self {
    Self::new([
      (Role::Eb, vec![
        "eb@society.com",
        "president@society.com",
        "vicepresident@society.com",
      ]),
      (Role::Ec, vec![
        "ec1@society.com",
        "ec2@society.com",
        "secretary@society.com",
      ]),
      (Role::Core, vec![
        "core1@society.com",
        "core2@society.com",
        "treasurer@society.com",
      ]),
      (Role::Member, vec![
        "member1@society.com",
        "member2@society.com",
        "member3@society.com",
      ]),
    ])
  }

  /// Whether `email` may assume `role`.
  pub fn authorizes(&self, role: Role, email: &str) -> bool {
    let email = email.to_lowercase();
    self
      .emails
      .get(&role)
      .is_some_and(|set| set.contains(&email))
  }

  /// The authorized emails for a role, for display at the login prompt.
  pub fn emails_for(&self, role: Role) -> Vec<&str> {
    let mut list: Vec<&str> = self
      .emails
      .get(&role)
      .map(|set| set.iter().map(String::as_str).collect())
      .unwrap_or_default();
    list.sort_unstable();
    list
  }

  /// Resolve a claimed email + chosen role into a session identity.
  ///
  /// `uid` is supplied by the credential collaborator; `name` is free text
  /// from the login form and is not validated against any registry.
  pub fn resolve(
    &self,
    email: &str,
    role: Role,
    name: &str,
    uid: Uuid,
  ) -> Result<Identity> {
    if !self.authorizes(role, email) {
      return Err(Error::UnauthorizedEmail {
        email: email.to_string(),
        role,
      });
    }
    Ok(Identity {
      uid,
      name: name.to_string(),
      email: email.to_string(),
      role,
    })
  }
}

// ─── Credential collaborator ─────────────────────────────────────────────────

/// The external credential verification step. Called by the host only after
/// [`RoleDirectory::authorizes`] has passed; returns the durable uid for the
/// email on success.
pub trait CredentialVerifier: Send + Sync {
  fn authenticate(
    &self,
    email: &str,
    password: &str,
  ) -> impl Future<Output = Result<Uuid>> + Send;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reference_allow_list_resolves_each_role() {
    let dir = RoleDirectory::reference();
    let cases = [
      ("president@society.com", Role::Eb),
      ("secretary@society.com", Role::Ec),
      ("treasurer@society.com", Role::Core),
      ("member2@society.com", Role::Member),
    ];
    for (email, role) in cases {
      let id = dir
        .resolve(email, role, "Alex", Uuid::new_v4())
        .unwrap();
      assert_eq!(id.email, email);
      assert_eq!(id.role, role);
    }
  }

  #[test]
  fn wrong_role_for_email_is_rejected() {
    let dir = RoleDirectory::reference();
    let err = dir
      .resolve("member1@society.com", Role::Eb, "Alex", Uuid::new_v4())
      .unwrap_err();
    assert!(matches!(err, Error::UnauthorizedEmail { role: Role::Eb, .. }));
  }

  #[test]
  fn unknown_email_is_rejected_for_every_role() {
    let dir = RoleDirectory::reference();
    for role in Role::ALL {
      assert!(!dir.authorizes(role, "intruder@society.com"));
    }
  }

  #[test]
  fn allow_list_check_is_case_insensitive() {
    let dir = RoleDirectory::reference();
    assert!(dir.authorizes(Role::Eb, "EB@Society.Com"));

    let id = dir
      .resolve("EB@society.com", Role::Eb, "Sam", Uuid::new_v4())
      .unwrap();
    // The email is kept as entered; only the check lower-cases.
    assert_eq!(id.email, "EB@society.com");
  }

  #[test]
  fn name_is_free_text_per_login() {
    let dir = RoleDirectory::reference();
    let uid = Uuid::new_v4();
    let first = dir.resolve("eb@society.com", Role::Eb, "S.", uid).unwrap();
    let second = dir
      .resolve("eb@society.com", Role::Eb, "Sam", uid)
      .unwrap();
    assert_ne!(first.name, second.name);
    assert_eq!(first.uid, second.uid);
  }

  #[test]
  fn injected_directory_overrides_reference() {
    let dir = RoleDirectory::new([(Role::Eb, vec!["chair@club.org"])]);
    assert!(dir.authorizes(Role::Eb, "chair@club.org"));
    assert!(!dir.authorizes(Role::Eb, "eb@society.com"));
    // Roles absent from the injected mapping authorize nobody.
    assert!(!dir.authorizes(Role::Member, "chair@club.org"));
  }
}
