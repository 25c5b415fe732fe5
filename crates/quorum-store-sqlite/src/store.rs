//! [`SqliteStore`] — the SQLite implementation of
//! [`SocietyStore`](quorum_core::store::SocietyStore).

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use quorum_core::{
  entity::{
    Announcement, Attendance, Event, Feedback, NewAnnouncement,
    NewAttendance, NewEvent, NewFeedback, NewResource, NewTask, Resource,
    Task,
  },
  identity::Identity,
  store::SocietyStore,
};

use crate::{
  Error, Result,
  encode::{
    RawAnnouncement, RawAttendance, RawEvent, RawFeedback, RawResource,
    RawTask, RawUser, encode_attendance_status, encode_date,
    encode_department, encode_dt, encode_event_kind, encode_priority,
    encode_role, encode_task_status, encode_time, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A society store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// DELETE by primary key; reports whether a row was removed.
  async fn delete_by_id(&self, table: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let removed: usize = self
      .conn
      .call(move |conn| {
        let n =
          conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), rusqlite::params![id_str])?;
        Ok(n)
      })
      .await?;
    Ok(removed > 0)
  }
}

// ─── SocietyStore impl ───────────────────────────────────────────────────────

impl SocietyStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn upsert_user(&self, identity: &Identity) -> Result<()> {
    let uid_str = encode_uuid(identity.uid);
    let name = identity.name.clone();
    let email = identity.email.clone();
    let role_str = encode_role(identity.role).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (uid, name, email, role) VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (uid) DO UPDATE SET
             name = excluded.name,
             email = excluded.email,
             role = excluded.role",
          rusqlite::params![uid_str, name, email, role_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_users(&self) -> Result<Vec<Identity>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT uid, name, email, role FROM users ORDER BY name")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawUser {
              uid:   row.get(0)?,
              name:  row.get(1)?,
              email: row.get(2)?,
              role:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_identity).collect()
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn create_event(&self, input: NewEvent, created_by: Uuid) -> Result<Event> {
    let event = Event {
      id: Uuid::new_v4(),
      title: input.title,
      description: input.description,
      kind: input.kind,
      priority: input.priority,
      date: input.date,
      time: input.time,
      venue: input.venue,
      created_at: Utc::now(),
      created_by,
    };

    let id_str       = encode_uuid(event.id);
    let title        = event.title.clone();
    let description  = event.description.clone();
    let kind_str     = encode_event_kind(event.kind).to_owned();
    let priority_str = encode_priority(event.priority).to_owned();
    let date_str     = encode_date(event.date);
    let time_str     = encode_time(event.time);
    let venue        = event.venue.clone();
    let at_str       = encode_dt(event.created_at);
    let by_str       = encode_uuid(event.created_by);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (
             id, title, description, kind, priority,
             date, time, venue, created_at, created_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            title,
            description,
            kind_str,
            priority_str,
            date_str,
            time_str,
            venue,
            at_str,
            by_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, title, description, kind, priority,
                      date, time, venue, created_at, created_by
               FROM events WHERE id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawEvent {
                  id:          row.get(0)?,
                  title:       row.get(1)?,
                  description: row.get(2)?,
                  kind:        row.get(3)?,
                  priority:    row.get(4)?,
                  date:        row.get(5)?,
                  time:        row.get(6)?,
                  venue:       row.get(7)?,
                  created_at:  row.get(8)?,
                  created_by:  row.get(9)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, description, kind, priority,
                  date, time, venue, created_at, created_by
           FROM events ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawEvent {
              id:          row.get(0)?,
              title:       row.get(1)?,
              description: row.get(2)?,
              kind:        row.get(3)?,
              priority:    row.get(4)?,
              date:        row.get(5)?,
              time:        row.get(6)?,
              venue:       row.get(7)?,
              created_at:  row.get(8)?,
              created_by:  row.get(9)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn delete_event(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("events", id).await
  }

  // ── Announcements ─────────────────────────────────────────────────────────

  async fn create_announcement(
    &self,
    input: NewAnnouncement,
    created_by: Uuid,
  ) -> Result<Announcement> {
    let announcement = Announcement {
      id: Uuid::new_v4(),
      title: input.title,
      content: input.content,
      priority: input.priority,
      created_at: Utc::now(),
      created_by,
    };

    let id_str       = encode_uuid(announcement.id);
    let title        = announcement.title.clone();
    let content      = announcement.content.clone();
    let priority_str = encode_priority(announcement.priority).to_owned();
    let at_str       = encode_dt(announcement.created_at);
    let by_str       = encode_uuid(announcement.created_by);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO announcements (id, title, content, priority, created_at, created_by)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, title, content, priority_str, at_str, by_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(announcement)
  }

  async fn list_announcements(&self) -> Result<Vec<Announcement>> {
    let raws: Vec<RawAnnouncement> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, content, priority, created_at, created_by
           FROM announcements ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawAnnouncement {
              id:         row.get(0)?,
              title:      row.get(1)?,
              content:    row.get(2)?,
              priority:   row.get(3)?,
              created_at: row.get(4)?,
              created_by: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawAnnouncement::into_announcement)
      .collect()
  }

  async fn delete_announcement(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("announcements", id).await
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn create_task(&self, input: NewTask, created_by: Uuid) -> Result<Task> {
    let task = Task {
      id: Uuid::new_v4(),
      title: input.title,
      description: input.description,
      event_id: input.event_id,
      domain: input.domain,
      priority: input.priority,
      status: input.status,
      assigned_to: input.assigned_to,
      due_date: input.due_date,
      created_at: Utc::now(),
      created_by,
    };

    let id_str       = encode_uuid(task.id);
    let title        = task.title.clone();
    let description  = task.description.clone();
    let event_id_str = encode_uuid(task.event_id);
    let domain       = task.domain.clone();
    let priority_str = encode_priority(task.priority).to_owned();
    let status_str   = encode_task_status(task.status).to_owned();
    let assigned_to  = task.assigned_to.clone();
    let due_str      = encode_date(task.due_date);
    let at_str       = encode_dt(task.created_at);
    let by_str       = encode_uuid(task.created_by);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tasks (
             id, title, description, event_id, domain, priority,
             status, assigned_to, due_date, created_at, created_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            title,
            description,
            event_id_str,
            domain,
            priority_str,
            status_str,
            assigned_to,
            due_str,
            at_str,
            by_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(task)
  }

  async fn list_tasks(&self) -> Result<Vec<Task>> {
    let raws: Vec<RawTask> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, description, event_id, domain, priority,
                  status, assigned_to, due_date, created_at, created_by
           FROM tasks ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawTask {
              id:          row.get(0)?,
              title:       row.get(1)?,
              description: row.get(2)?,
              event_id:    row.get(3)?,
              domain:      row.get(4)?,
              priority:    row.get(5)?,
              status:      row.get(6)?,
              assigned_to: row.get(7)?,
              due_date:    row.get(8)?,
              created_at:  row.get(9)?,
              created_by:  row.get(10)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTask::into_task).collect()
  }

  // ── Attendance ────────────────────────────────────────────────────────────

  async fn create_attendance(
    &self,
    input: NewAttendance,
    marked_by: Uuid,
  ) -> Result<Attendance> {
    let record = Attendance {
      id: Uuid::new_v4(),
      event_id: input.event_id,
      user_id: input.user_id,
      status: input.status,
      marked_by,
      marked_at: Utc::now(),
    };

    let id_str       = encode_uuid(record.id);
    let event_id_str = encode_uuid(record.event_id);
    let user_id_str  = encode_uuid(record.user_id);
    let status_str   = encode_attendance_status(record.status).to_owned();
    let by_str       = encode_uuid(record.marked_by);
    let at_str       = encode_dt(record.marked_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO attendance (id, event_id, user_id, status, marked_by, marked_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, event_id_str, user_id_str, status_str, by_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn list_attendance(&self, event_id: Uuid) -> Result<Vec<Attendance>> {
    let event_id_str = encode_uuid(event_id);

    let raws: Vec<RawAttendance> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, event_id, user_id, status, marked_by, marked_at
           FROM attendance WHERE event_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![event_id_str], |row| {
            Ok(RawAttendance {
              id:        row.get(0)?,
              event_id:  row.get(1)?,
              user_id:   row.get(2)?,
              status:    row.get(3)?,
              marked_by: row.get(4)?,
              marked_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAttendance::into_attendance).collect()
  }

  async fn find_attendance(
    &self,
    event_id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Attendance>> {
    let event_id_str = encode_uuid(event_id);
    let user_id_str  = encode_uuid(user_id);

    let raw: Option<RawAttendance> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, event_id, user_id, status, marked_by, marked_at
               FROM attendance WHERE event_id = ?1 AND user_id = ?2",
              rusqlite::params![event_id_str, user_id_str],
              |row| {
                Ok(RawAttendance {
                  id:        row.get(0)?,
                  event_id:  row.get(1)?,
                  user_id:   row.get(2)?,
                  status:    row.get(3)?,
                  marked_by: row.get(4)?,
                  marked_at: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAttendance::into_attendance).transpose()
  }

  // ── Resources ─────────────────────────────────────────────────────────────

  async fn create_resource(
    &self,
    input: NewResource,
    created_by: Uuid,
  ) -> Result<Resource> {
    let resource = Resource {
      id: Uuid::new_v4(),
      department: input.department,
      title: input.title,
      description: input.description,
      url: input.url,
      created_at: Utc::now(),
      created_by,
    };

    let id_str      = encode_uuid(resource.id);
    let dept_str    = encode_department(resource.department).to_owned();
    let title       = resource.title.clone();
    let description = resource.description.clone();
    let url         = resource.url.clone();
    let at_str      = encode_dt(resource.created_at);
    let by_str      = encode_uuid(resource.created_by);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resources (id, department, title, description, url, created_at, created_by)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, dept_str, title, description, url, at_str, by_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(resource)
  }

  async fn list_resources(&self) -> Result<Vec<Resource>> {
    let raws: Vec<RawResource> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, department, title, description, url, created_at, created_by
           FROM resources ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawResource {
              id:          row.get(0)?,
              department:  row.get(1)?,
              title:       row.get(2)?,
              description: row.get(3)?,
              url:         row.get(4)?,
              created_at:  row.get(5)?,
              created_by:  row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawResource::into_resource).collect()
  }

  async fn delete_resource(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("resources", id).await
  }

  // ── Feedback ──────────────────────────────────────────────────────────────

  async fn create_feedback(
    &self,
    input: NewFeedback,
    user_id: Uuid,
  ) -> Result<Feedback> {
    let feedback = Feedback {
      id: Uuid::new_v4(),
      event_id: input.event_id,
      user_id,
      rating: input.rating,
      comments: input.comments,
      created_at: Utc::now(),
    };

    let id_str       = encode_uuid(feedback.id);
    let event_id_str = encode_uuid(feedback.event_id);
    let user_id_str  = encode_uuid(feedback.user_id);
    let rating       = i64::from(feedback.rating);
    let comments     = feedback.comments.clone();
    let at_str       = encode_dt(feedback.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO feedback (id, event_id, user_id, rating, comments, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, event_id_str, user_id_str, rating, comments, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(feedback)
  }

  async fn list_feedback(&self, event_id: Option<Uuid>) -> Result<Vec<Feedback>> {
    let event_id_str = event_id.map(encode_uuid);

    let raws: Vec<RawFeedback> = self
      .conn
      .call(move |conn| {
        let map_row = |row: &rusqlite::Row<'_>| {
          Ok(RawFeedback {
            id:         row.get(0)?,
            event_id:   row.get(1)?,
            user_id:    row.get(2)?,
            rating:     row.get(3)?,
            comments:   row.get(4)?,
            created_at: row.get(5)?,
          })
        };

        let rows = if let Some(eid) = event_id_str {
          let mut stmt = conn.prepare(
            "SELECT id, event_id, user_id, rating, comments, created_at
             FROM feedback WHERE event_id = ?1 ORDER BY created_at DESC",
          )?;
          stmt
            .query_map(rusqlite::params![eid], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT id, event_id, user_id, rating, comments, created_at
             FROM feedback ORDER BY created_at DESC",
          )?;
          stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFeedback::into_feedback).collect()
  }
}
