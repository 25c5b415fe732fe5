//! The `SocietyStore` trait — the document-store collaborator.
//!
//! Implemented by storage backends (e.g. `quorum-store-sqlite`). The gateway
//! and the HTTP layer depend on this abstraction, not on any concrete
//! backend. Ids and creation timestamps are assigned by the store.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  entity::{
    Announcement, Attendance, Event, Feedback, NewAnnouncement,
    NewAttendance, NewEvent, NewFeedback, NewResource, NewTask, Resource,
    Task,
  },
  identity::Identity,
};

/// Abstraction over the society's document store.
///
/// List order contracts (relied on by the projections):
/// - `list_events`, `list_announcements`, `list_resources`, `list_tasks`:
///   `created_at desc`.
/// - `list_feedback`: `created_at desc`.
///
/// Deletes report whether the record existed so the gateway can surface a
/// typed not-found; they never cascade to referencing records.
pub trait SocietyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist the identity seen at login, replacing any previous record for
  /// the same uid (the display name is whatever the latest login entered).
  fn upsert_user(
    &self,
    identity: &Identity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<Identity>, Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  fn create_event(
    &self,
    input: NewEvent,
    created_by: Uuid,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn get_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  /// Returns `false` if no event with this id existed.
  fn delete_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Announcements ─────────────────────────────────────────────────────

  fn create_announcement(
    &self,
    input: NewAnnouncement,
    created_by: Uuid,
  ) -> impl Future<Output = Result<Announcement, Self::Error>> + Send + '_;

  fn list_announcements(
    &self,
  ) -> impl Future<Output = Result<Vec<Announcement>, Self::Error>> + Send + '_;

  fn delete_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Tasks ─────────────────────────────────────────────────────────────

  fn create_task(
    &self,
    input: NewTask,
    created_by: Uuid,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  fn list_tasks(
    &self,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  // ── Attendance ────────────────────────────────────────────────────────

  fn create_attendance(
    &self,
    input: NewAttendance,
    marked_by: Uuid,
  ) -> impl Future<Output = Result<Attendance, Self::Error>> + Send + '_;

  /// All records for one event.
  fn list_attendance(
    &self,
    event_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Attendance>, Self::Error>> + Send + '_;

  /// The record for one `(event, user)` pair, if any. Used by the gateway
  /// to enforce the one-record-per-pair invariant before creating.
  fn find_attendance(
    &self,
    event_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<Attendance>, Self::Error>> + Send + '_;

  // ── Resources ─────────────────────────────────────────────────────────

  fn create_resource(
    &self,
    input: NewResource,
    created_by: Uuid,
  ) -> impl Future<Output = Result<Resource, Self::Error>> + Send + '_;

  fn list_resources(
    &self,
  ) -> impl Future<Output = Result<Vec<Resource>, Self::Error>> + Send + '_;

  fn delete_resource(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Feedback ──────────────────────────────────────────────────────────

  fn create_feedback(
    &self,
    input: NewFeedback,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Feedback, Self::Error>> + Send + '_;

  /// All feedback, optionally restricted to one event.
  fn list_feedback(
    &self,
    event_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Feedback>, Self::Error>> + Send + '_;
}
