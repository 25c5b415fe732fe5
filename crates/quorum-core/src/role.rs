//! The fixed role set of the society.
//!
//! Two tiers only: the senior organising tier (EB, EC, Core) and the junior
//! tier (Member). This is deliberately a flat split, not a permission
//! lattice — the policy table in [`crate::policy`] is the whole story.

use serde::{Deserialize, Serialize};

/// A role a member may assume at login.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Role {
  #[serde(rename = "EB")]
  Eb,
  #[serde(rename = "EC")]
  Ec,
  Core,
  Member,
}

impl Role {
  pub const ALL: [Role; 4] = [Role::Eb, Role::Ec, Role::Core, Role::Member];

  /// The elevated organising tier: EB, EC and Core.
  pub fn is_senior(self) -> bool {
    matches!(self, Role::Eb | Role::Ec | Role::Core)
  }

  /// The display string, matching the serialised form.
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Eb => "EB",
      Role::Ec => "EC",
      Role::Core => "Core",
      Role::Member => "Member",
    }
  }
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn senior_tier_is_eb_ec_core() {
    assert!(Role::Eb.is_senior());
    assert!(Role::Ec.is_senior());
    assert!(Role::Core.is_senior());
    assert!(!Role::Member.is_senior());
  }

  #[test]
  fn serialises_to_display_names() {
    for role in Role::ALL {
      let json = serde_json::to_string(&role).unwrap();
      assert_eq!(json, format!("\"{role}\""));
      let back: Role = serde_json::from_str(&json).unwrap();
      assert_eq!(back, role);
    }
  }
}
