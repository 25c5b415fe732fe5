//! The authorization policy — a pure function over (role, entity, operation).
//!
//! Reads of already-fetched data are unrestricted for every role, with one
//! exception: the attendance feature is gated as a whole and only visible to
//! the senior tier. Everything else follows the create/delete table below.
//!
//! | Entity       | Create  | Delete  | View    |
//! |--------------|---------|---------|---------|
//! | Event        | senior  | senior  | all     |
//! | Announcement | senior  | senior  | all     |
//! | Task         | senior  | nobody  | all     |
//! | Attendance   | senior  | nobody  | senior  |
//! | Resource     | senior  | senior  | all     |
//! | Feedback     | all     | nobody  | all     |

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The six entity collections the policy speaks about.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
  Event,
  Announcement,
  Task,
  Attendance,
  Resource,
  Feedback,
}

impl std::fmt::Display for EntityKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      EntityKind::Event => "event",
      EntityKind::Announcement => "announcement",
      EntityKind::Task => "task",
      EntityKind::Attendance => "attendance",
      EntityKind::Resource => "resource",
      EntityKind::Feedback => "feedback",
    };
    f.write_str(s)
  }
}

/// The operations the policy gates. Attendance is append-only and tasks and
/// feedback have no delete path at all, so those combinations deny.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
  Create,
  Delete,
  View,
}

impl std::fmt::Display for Operation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Operation::Create => "create",
      Operation::Delete => "delete",
      Operation::View => "view",
    };
    f.write_str(s)
  }
}

/// Whether `role` may perform `operation` on `entity`. Pure; no I/O.
pub fn allows(role: Role, entity: EntityKind, operation: Operation) -> bool {
  use EntityKind as E;
  use Operation as O;

  match (entity, operation) {
    // Feedback is the one thing the junior tier can write.
    (E::Feedback, O::Create) => true,
    (E::Feedback, O::Delete) => false,

    // Tasks and attendance records are never deleted.
    (E::Task, O::Delete) => false,
    (E::Attendance, O::Delete) => false,

    // The attendance dashboard is only offered to the senior tier.
    (E::Attendance, O::View) => role.is_senior(),

    // All other reads are unrestricted.
    (_, O::View) => true,

    // Every remaining write belongs to the organising tier.
    (_, O::Create | O::Delete) => role.is_senior(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SENIOR: [Role; 3] = [Role::Eb, Role::Ec, Role::Core];

  #[test]
  fn full_table_for_seniors() {
    use EntityKind as E;
    use Operation as O;

    for role in SENIOR {
      for entity in [
        E::Event,
        E::Announcement,
        E::Task,
        E::Attendance,
        E::Resource,
        E::Feedback,
      ] {
        assert!(allows(role, entity, O::Create), "{role} create {entity}");
        assert!(allows(role, entity, O::View), "{role} view {entity}");
      }
      assert!(allows(role, E::Event, O::Delete));
      assert!(allows(role, E::Announcement, O::Delete));
      assert!(allows(role, E::Resource, O::Delete));
      assert!(!allows(role, E::Task, O::Delete));
      assert!(!allows(role, E::Attendance, O::Delete));
      assert!(!allows(role, E::Feedback, O::Delete));
    }
  }

  #[test]
  fn members_can_only_submit_feedback() {
    use EntityKind as E;
    use Operation as O;

    assert!(allows(Role::Member, E::Feedback, O::Create));
    for entity in
      [E::Event, E::Announcement, E::Task, E::Attendance, E::Resource]
    {
      assert!(!allows(Role::Member, entity, O::Create), "create {entity}");
      assert!(!allows(Role::Member, entity, O::Delete), "delete {entity}");
    }
  }

  #[test]
  fn attendance_view_is_senior_gated() {
    assert!(allows(Role::Core, EntityKind::Attendance, Operation::View));
    assert!(!allows(Role::Member, EntityKind::Attendance, Operation::View));
    // Every other collection is readable by members.
    for entity in [
      EntityKind::Event,
      EntityKind::Announcement,
      EntityKind::Task,
      EntityKind::Resource,
      EntityKind::Feedback,
    ] {
      assert!(allows(Role::Member, entity, Operation::View), "{entity}");
    }
  }
}
