//! Entity schemas — the six collections of the society organiser.
//!
//! Entities are immutable records once fetched; a mutation is always a
//! replace through the store, never an in-place edit. Ids and creation
//! timestamps are store-assigned, so each entity has a `New*` input twin
//! without them (the same split as input vs. persisted record elsewhere in
//! the workspace).
//!
//! Cross-entity references (`event_id`, `user_id`) are weak: they must
//! resolve at creation time but are not cleaned up when the referent is
//! deleted. Projections treat a dangling reference as "unknown".

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Shared enumerations ─────────────────────────────────────────────────────

/// Announcement, event and task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
  High,
  Medium,
  Low,
}

impl Priority {
  /// Ordinal used by the announcement ranking projection; higher sorts
  /// first.
  pub fn ordinal(self) -> u8 {
    match self {
      Priority::High => 3,
      Priority::Medium => 2,
      Priority::Low => 1,
    }
  }
}

/// What kind of gathering an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
  Workshop,
  Hackathon,
  Meet,
  Event,
}

/// Task progress. Manually set at creation; there is no clock-driven
/// transition between `Upcoming` and `Today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
  Upcoming,
  Today,
  Completed,
}

/// A marked attendance outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
  Present,
  Absent,
}

/// The society's departments; resources are shelved under one each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
  Tech,
  Marketing,
  Content,
  Media,
}

impl Department {
  /// Display order of the resource shelves.
  pub const ALL: [Department; 4] = [
    Department::Tech,
    Department::Marketing,
    Department::Content,
    Department::Media,
  ];
}

// ─── Event ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
  pub kind:        EventKind,
  pub priority:    Priority,
  pub date:        NaiveDate,
  pub time:        NaiveTime,
  pub venue:       String,
  pub created_at:  DateTime<Utc>,
  pub created_by:  Uuid,
}

/// Input to [`crate::store::SocietyStore::create_event`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
  pub title:       String,
  pub description: String,
  pub kind:        EventKind,
  pub priority:    Priority,
  pub date:        NaiveDate,
  pub time:        NaiveTime,
  pub venue:       String,
}

// ─── Announcement ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
  pub id:         Uuid,
  pub title:      String,
  pub content:    String,
  pub priority:   Priority,
  pub created_at: DateTime<Utc>,
  pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
  pub title:    String,
  pub content:  String,
  pub priority: Priority,
}

// ─── Task ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
  /// Weak reference; must resolve at creation only.
  pub event_id:    Uuid,
  /// Free-text organising domain, e.g. "Logistics".
  pub domain:      String,
  pub priority:    Priority,
  pub status:      TaskStatus,
  pub assigned_to: Option<String>,
  pub due_date:    NaiveDate,
  pub created_at:  DateTime<Utc>,
  pub created_by:  Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
  pub title:       String,
  pub description: String,
  pub event_id:    Uuid,
  pub domain:      String,
  pub priority:    Priority,
  pub status:      TaskStatus,
  pub assigned_to: Option<String>,
  pub due_date:    NaiveDate,
}

// ─── Attendance ──────────────────────────────────────────────────────────────

/// Append-only. At most one record per `(event_id, user_id)` pair; the
/// gateway rejects duplicates and the SQLite backend carries a UNIQUE index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
  pub id:        Uuid,
  pub event_id:  Uuid,
  pub user_id:   Uuid,
  pub status:    AttendanceStatus,
  pub marked_by: Uuid,
  pub marked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendance {
  pub event_id: Uuid,
  pub user_id:  Uuid,
  pub status:   AttendanceStatus,
}

// ─── Resource ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
  pub id:          Uuid,
  pub department:  Department,
  pub title:       String,
  pub description: String,
  pub url:         String,
  pub created_at:  DateTime<Utc>,
  pub created_by:  Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResource {
  pub department:  Department,
  pub title:       String,
  pub description: String,
  pub url:         String,
}

// ─── Feedback ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
  pub id:         Uuid,
  pub event_id:   Uuid,
  pub user_id:    Uuid,
  /// Star rating, 1–5 inclusive. The gateway rejects anything else.
  pub rating:     u8,
  pub comments:   String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
  pub event_id: Uuid,
  pub rating:   u8,
  #[serde(default)]
  pub comments: String,
}
