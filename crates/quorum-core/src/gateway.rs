//! The mutation gateway — the single choke point for writes.
//!
//! Every create/delete passes through here: session check, policy check,
//! payload validation, reference resolution, then a single store call. No
//! retries, no caching; after a success the caller re-runs whatever
//! projection it needs.
//!
//! Two invariants are enforced here rather than trusted to the UI:
//! - `Task`/`Attendance`/`Feedback` creation requires the referenced event
//!   to exist *at creation time* (the reference may dangle later);
//! - at most one attendance record per `(event, user)` pair.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  entity::{
    Announcement, Attendance, Event, Feedback, NewAnnouncement,
    NewAttendance, NewEvent, NewFeedback, NewResource, NewTask, Resource,
    Task,
  },
  identity::Identity,
  policy::{EntityKind, Operation, allows},
  store::SocietyStore,
};

// ─── Validation ──────────────────────────────────────────────────────────────

fn require_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::InvalidPayload(format!("{field} must not be blank")));
  }
  Ok(())
}

fn validate_event(input: &NewEvent) -> Result<()> {
  require_text("title", &input.title)?;
  require_text("description", &input.description)?;
  require_text("venue", &input.venue)
}

fn validate_announcement(input: &NewAnnouncement) -> Result<()> {
  require_text("title", &input.title)?;
  require_text("content", &input.content)
}

fn validate_task(input: &NewTask) -> Result<()> {
  require_text("title", &input.title)?;
  require_text("description", &input.description)?;
  require_text("domain", &input.domain)
}

fn validate_resource(input: &NewResource) -> Result<()> {
  require_text("title", &input.title)?;
  require_text("description", &input.description)?;
  require_text("url", &input.url)
}

fn validate_feedback(input: &NewFeedback) -> Result<()> {
  if !(1..=5).contains(&input.rating) {
    return Err(Error::InvalidPayload(format!(
      "rating must be between 1 and 5, got {}",
      input.rating
    )));
  }
  Ok(())
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

/// Gates mutations on a [`SocietyStore`] behind the authorization policy.
///
/// Cloning is cheap; the store is shared.
pub struct Gateway<S> {
  store: Arc<S>,
}

impl<S> Clone for Gateway<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: SocietyStore> Gateway<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Session + policy gate shared by every mutation.
  fn authorize<'a>(
    identity: Option<&'a Identity>,
    entity: EntityKind,
    operation: Operation,
  ) -> Result<&'a Identity> {
    let identity = identity.ok_or(Error::Unauthenticated)?;
    if !allows(identity.role, entity, operation) {
      return Err(Error::Forbidden {
        role: identity.role,
        entity,
        operation,
      });
    }
    Ok(identity)
  }

  /// Read gate for the feature-gated views (the attendance dashboard).
  pub fn ensure_view(
    identity: Option<&Identity>,
    entity: EntityKind,
  ) -> Result<&Identity> {
    Self::authorize(identity, entity, Operation::View)
  }

  async fn resolve_event(&self, event_id: Uuid) -> Result<Event> {
    self
      .store
      .get_event(event_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound { entity: EntityKind::Event, id: event_id })
  }

  // ── Events ────────────────────────────────────────────────────────────

  pub async fn create_event(
    &self,
    identity: Option<&Identity>,
    input: NewEvent,
  ) -> Result<Event> {
    let who =
      Self::authorize(identity, EntityKind::Event, Operation::Create)?;
    validate_event(&input)?;
    self
      .store
      .create_event(input, who.uid)
      .await
      .map_err(Error::store)
  }

  pub async fn delete_event(
    &self,
    identity: Option<&Identity>,
    id: Uuid,
  ) -> Result<()> {
    Self::authorize(identity, EntityKind::Event, Operation::Delete)?;
    let existed = self.store.delete_event(id).await.map_err(Error::store)?;
    if !existed {
      return Err(Error::NotFound { entity: EntityKind::Event, id });
    }
    // No cascade: tasks, attendance and feedback referencing the event are
    // left in place and become dangling references.
    Ok(())
  }

  // ── Announcements ─────────────────────────────────────────────────────

  pub async fn create_announcement(
    &self,
    identity: Option<&Identity>,
    input: NewAnnouncement,
  ) -> Result<Announcement> {
    let who =
      Self::authorize(identity, EntityKind::Announcement, Operation::Create)?;
    validate_announcement(&input)?;
    self
      .store
      .create_announcement(input, who.uid)
      .await
      .map_err(Error::store)
  }

  pub async fn delete_announcement(
    &self,
    identity: Option<&Identity>,
    id: Uuid,
  ) -> Result<()> {
    Self::authorize(identity, EntityKind::Announcement, Operation::Delete)?;
    let existed = self
      .store
      .delete_announcement(id)
      .await
      .map_err(Error::store)?;
    if !existed {
      return Err(Error::NotFound { entity: EntityKind::Announcement, id });
    }
    Ok(())
  }

  // ── Tasks ─────────────────────────────────────────────────────────────

  pub async fn create_task(
    &self,
    identity: Option<&Identity>,
    mut input: NewTask,
  ) -> Result<Task> {
    let who = Self::authorize(identity, EntityKind::Task, Operation::Create)?;
    validate_task(&input)?;
    self.resolve_event(input.event_id).await?;
    // Blank assignee means unassigned.
    if input.assigned_to.as_deref().is_some_and(|s| s.trim().is_empty()) {
      input.assigned_to = None;
    }
    self
      .store
      .create_task(input, who.uid)
      .await
      .map_err(Error::store)
  }

  // ── Attendance ────────────────────────────────────────────────────────

  pub async fn create_attendance(
    &self,
    identity: Option<&Identity>,
    input: NewAttendance,
  ) -> Result<Attendance> {
    let who =
      Self::authorize(identity, EntityKind::Attendance, Operation::Create)?;
    self.resolve_event(input.event_id).await?;
    let existing = self
      .store
      .find_attendance(input.event_id, input.user_id)
      .await
      .map_err(Error::store)?;
    if existing.is_some() {
      return Err(Error::InvalidPayload(format!(
        "attendance for user {} at event {} is already recorded",
        input.user_id, input.event_id
      )));
    }
    self
      .store
      .create_attendance(input, who.uid)
      .await
      .map_err(Error::store)
  }

  // ── Resources ─────────────────────────────────────────────────────────

  pub async fn create_resource(
    &self,
    identity: Option<&Identity>,
    input: NewResource,
  ) -> Result<Resource> {
    let who =
      Self::authorize(identity, EntityKind::Resource, Operation::Create)?;
    validate_resource(&input)?;
    self
      .store
      .create_resource(input, who.uid)
      .await
      .map_err(Error::store)
  }

  pub async fn delete_resource(
    &self,
    identity: Option<&Identity>,
    id: Uuid,
  ) -> Result<()> {
    Self::authorize(identity, EntityKind::Resource, Operation::Delete)?;
    let existed =
      self.store.delete_resource(id).await.map_err(Error::store)?;
    if !existed {
      return Err(Error::NotFound { entity: EntityKind::Resource, id });
    }
    Ok(())
  }

  // ── Feedback ──────────────────────────────────────────────────────────

  pub async fn create_feedback(
    &self,
    identity: Option<&Identity>,
    input: NewFeedback,
  ) -> Result<Feedback> {
    let who =
      Self::authorize(identity, EntityKind::Feedback, Operation::Create)?;
    validate_feedback(&input)?;
    self.resolve_event(input.event_id).await?;
    self
      .store
      .create_feedback(input, who.uid)
      .await
      .map_err(Error::store)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, NaiveTime};

  use super::*;
  use crate::entity::{EventKind, Priority, TaskStatus};
  use crate::role::Role;

  fn identity(role: Role) -> Identity {
    Identity {
      uid:   Uuid::new_v4(),
      name:  "Alex".to_string(),
      email: "alex@society.com".to_string(),
      role,
    }
  }

  fn new_event() -> NewEvent {
    NewEvent {
      title:       "Intro Workshop".to_string(),
      description: "Kick-off session".to_string(),
      kind:        EventKind::Workshop,
      priority:    Priority::High,
      date:        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
      time:        NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
      venue:       "Lab 2".to_string(),
    }
  }

  // ── Pure validation ─────────────────────────────────────────────────────

  #[test]
  fn blank_title_is_invalid() {
    let mut input = new_event();
    input.title = "   ".to_string();
    assert!(matches!(
      validate_event(&input),
      Err(Error::InvalidPayload(_))
    ));
  }

  #[test]
  fn rating_bounds() {
    let fb = |rating| NewFeedback {
      event_id: Uuid::new_v4(),
      rating,
      comments: "good session".to_string(),
    };
    assert!(matches!(
      validate_feedback(&fb(0)),
      Err(Error::InvalidPayload(_))
    ));
    assert!(matches!(
      validate_feedback(&fb(6)),
      Err(Error::InvalidPayload(_))
    ));
    assert!(validate_feedback(&fb(1)).is_ok());
    assert!(validate_feedback(&fb(5)).is_ok());
  }

  #[test]
  fn task_requires_domain() {
    let input = NewTask {
      title:       "Book venue".to_string(),
      description: "Reserve Lab 2".to_string(),
      event_id:    Uuid::new_v4(),
      domain:      String::new(),
      priority:    Priority::Medium,
      status:      TaskStatus::Upcoming,
      assigned_to: None,
      due_date:    NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
    };
    assert!(matches!(validate_task(&input), Err(Error::InvalidPayload(_))));
  }

  // ── Session and policy gates (no store call needed) ─────────────────────

  #[test]
  fn missing_identity_is_unauthenticated() {
    let err = Gateway::<NeverStore>::authorize(
      None,
      EntityKind::Event,
      Operation::Create,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
  }

  #[test]
  fn member_create_event_is_forbidden() {
    let id = identity(Role::Member);
    let err = Gateway::<NeverStore>::authorize(
      Some(&id),
      EntityKind::Event,
      Operation::Create,
    )
    .unwrap_err();
    assert!(matches!(
      err,
      Error::Forbidden { role: Role::Member, entity: EntityKind::Event, .. }
    ));
  }

  #[test]
  fn member_may_pass_the_feedback_gate() {
    let id = identity(Role::Member);
    assert!(
      Gateway::<NeverStore>::authorize(
        Some(&id),
        EntityKind::Feedback,
        Operation::Create,
      )
      .is_ok()
    );
  }

  #[test]
  fn attendance_view_gate() {
    let senior = identity(Role::Ec);
    let junior = identity(Role::Member);
    assert!(
      Gateway::<NeverStore>::ensure_view(
        Some(&senior),
        EntityKind::Attendance
      )
      .is_ok()
    );
    assert!(matches!(
      Gateway::<NeverStore>::ensure_view(
        Some(&junior),
        EntityKind::Attendance
      ),
      Err(Error::Forbidden { .. })
    ));
  }

  // A store that is never reached; the gates above fail first.
  struct NeverStore;

  impl SocietyStore for NeverStore {
    type Error = std::convert::Infallible;

    async fn upsert_user(&self, _: &Identity) -> Result<(), Self::Error> {
      unreachable!()
    }
    async fn list_users(&self) -> Result<Vec<Identity>, Self::Error> {
      unreachable!()
    }
    async fn create_event(
      &self,
      _: NewEvent,
      _: Uuid,
    ) -> Result<Event, Self::Error> {
      unreachable!()
    }
    async fn get_event(&self, _: Uuid) -> Result<Option<Event>, Self::Error> {
      unreachable!()
    }
    async fn list_events(&self) -> Result<Vec<Event>, Self::Error> {
      unreachable!()
    }
    async fn delete_event(&self, _: Uuid) -> Result<bool, Self::Error> {
      unreachable!()
    }
    async fn create_announcement(
      &self,
      _: NewAnnouncement,
      _: Uuid,
    ) -> Result<Announcement, Self::Error> {
      unreachable!()
    }
    async fn list_announcements(
      &self,
    ) -> Result<Vec<Announcement>, Self::Error> {
      unreachable!()
    }
    async fn delete_announcement(&self, _: Uuid) -> Result<bool, Self::Error> {
      unreachable!()
    }
    async fn create_task(
      &self,
      _: NewTask,
      _: Uuid,
    ) -> Result<Task, Self::Error> {
      unreachable!()
    }
    async fn list_tasks(&self) -> Result<Vec<Task>, Self::Error> {
      unreachable!()
    }
    async fn create_attendance(
      &self,
      _: NewAttendance,
      _: Uuid,
    ) -> Result<Attendance, Self::Error> {
      unreachable!()
    }
    async fn list_attendance(
      &self,
      _: Uuid,
    ) -> Result<Vec<Attendance>, Self::Error> {
      unreachable!()
    }
    async fn find_attendance(
      &self,
      _: Uuid,
      _: Uuid,
    ) -> Result<Option<Attendance>, Self::Error> {
      unreachable!()
    }
    async fn create_resource(
      &self,
      _: NewResource,
      _: Uuid,
    ) -> Result<Resource, Self::Error> {
      unreachable!()
    }
    async fn list_resources(&self) -> Result<Vec<Resource>, Self::Error> {
      unreachable!()
    }
    async fn delete_resource(&self, _: Uuid) -> Result<bool, Self::Error> {
      unreachable!()
    }
    async fn create_feedback(
      &self,
      _: NewFeedback,
      _: Uuid,
    ) -> Result<Feedback, Self::Error> {
      unreachable!()
    }
    async fn list_feedback(
      &self,
      _: Option<Uuid>,
    ) -> Result<Vec<Feedback>, Self::Error> {
      unreachable!()
    }
  }
}
