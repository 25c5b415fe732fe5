//! View projections — derived, read-only computations over fetched
//! collections.
//!
//! Every function here is pure: same input, same output, inputs never
//! mutated in place. Callers re-run the relevant projection after a
//! successful mutation; nothing is cached.

use serde::Serialize;
use uuid::Uuid;

use crate::{
  entity::{
    Announcement, Attendance, Department, Event, Feedback, Resource, Task,
    TaskStatus,
  },
  identity::Identity,
};

// ─── Announcement ranking ────────────────────────────────────────────────────

/// Re-sort announcements by priority, descending, preserving the incoming
/// order within equal priorities.
///
/// The store returns announcements `created_at desc`; sorting by priority
/// client-side avoids a composite `(priority, created_at)` index. `sort_by`
/// is stable, which is what keeps ties in recency order.
pub fn rank_announcements(mut announcements: Vec<Announcement>) -> Vec<Announcement> {
  announcements.sort_by(|a, b| b.priority.ordinal().cmp(&a.priority.ordinal()));
  announcements
}

// ─── Attendance roster ───────────────────────────────────────────────────────

/// One row of the per-event roster: a user and their attendance record for
/// the event, if any. A row without a record is still markable; a row with
/// one is locked.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
  pub user:   Identity,
  pub record: Option<Attendance>,
}

impl RosterEntry {
  pub fn is_marked(&self) -> bool { self.record.is_some() }
}

/// Join every known user against the attendance records of one event.
///
/// First matching record wins — the meaningful-record invariant from the
/// data model. `attendance` may contain records for other events; they are
/// ignored.
pub fn roster(
  users: &[Identity],
  attendance: &[Attendance],
  event_id: Uuid,
) -> Vec<RosterEntry> {
  users
    .iter()
    .map(|user| {
      let record = attendance
        .iter()
        .find(|a| a.event_id == event_id && a.user_id == user.uid)
        .cloned();
      RosterEntry { user: user.clone(), record }
    })
    .collect()
}

// ─── Resource shelves ────────────────────────────────────────────────────────

/// A department's slice of the resource library.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentShelf {
  pub department: Department,
  pub count:      usize,
  /// Newest-first, inherited from the store's `created_at desc` order.
  pub resources:  Vec<Resource>,
}

/// Partition resources into the four department shelves, in the fixed
/// display order. Departments without resources still appear, with a zero
/// count.
pub fn department_shelves(resources: &[Resource]) -> Vec<DepartmentShelf> {
  Department::ALL
    .into_iter()
    .map(|department| {
      let shelf: Vec<Resource> = resources
        .iter()
        .filter(|r| r.department == department)
        .cloned()
        .collect();
      DepartmentShelf {
        department,
        count: shelf.len(),
        resources: shelf,
      }
    })
    .collect()
}

// ─── Task board ──────────────────────────────────────────────────────────────

/// Tasks grouped by status. The grouping is all this projection does —
/// status is whatever was set at creation, never recomputed from `due_date`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskBoard {
  pub upcoming:  Vec<Task>,
  pub today:     Vec<Task>,
  pub completed: Vec<Task>,
}

pub fn task_board(tasks: Vec<Task>) -> TaskBoard {
  let mut board = TaskBoard::default();
  for task in tasks {
    match task.status {
      TaskStatus::Upcoming => board.upcoming.push(task),
      TaskStatus::Today => board.today.push(task),
      TaskStatus::Completed => board.completed.push(task),
    }
  }
  board
}

// ─── Feedback views ──────────────────────────────────────────────────────────

/// Events offered for review, most recent event date first, stable on ties.
pub fn reviewable_events(mut events: Vec<Event>) -> Vec<Event> {
  events.sort_by(|a, b| b.date.cmp(&a.date));
  events
}

/// A feedback record with the referenced event's title resolved, when the
/// event still exists. A deleted event leaves `event_title` empty rather
/// than failing the view.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRow {
  pub feedback:    Feedback,
  pub event_title: Option<String>,
}

pub fn feedback_overview(
  feedback: &[Feedback],
  events: &[Event],
) -> Vec<FeedbackRow> {
  feedback
    .iter()
    .map(|fb| {
      let event_title = events
        .iter()
        .find(|e| e.id == fb.event_id)
        .map(|e| e.title.clone());
      FeedbackRow { feedback: fb.clone(), event_title }
    })
    .collect()
}
