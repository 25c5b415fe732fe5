//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as ISO 8601,
//! clock times as `HH:MM:SS`. Enumerations are stored as their display
//! strings. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use quorum_core::{
  entity::{
    Announcement, Attendance, AttendanceStatus, Department, Event, EventKind,
    Feedback, Priority, Resource, Task, TaskStatus,
  },
  identity::Identity,
  role::Role,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse()
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

pub fn encode_time(t: NaiveTime) -> String { t.format("%H:%M:%S").to_string() }

pub fn decode_time(s: &str) -> Result<NaiveTime> {
  NaiveTime::parse_from_str(s, "%H:%M:%S")
    .map_err(|e| Error::Decode(format!("time {s:?}: {e}")))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str { r.as_str() }

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "EB" => Ok(Role::Eb),
    "EC" => Ok(Role::Ec),
    "Core" => Ok(Role::Core),
    "Member" => Ok(Role::Member),
    other => Err(Error::Decode(format!("unknown role: {other:?}"))),
  }
}

// ─── Priority ────────────────────────────────────────────────────────────────

pub fn encode_priority(p: Priority) -> &'static str {
  match p {
    Priority::High => "High",
    Priority::Medium => "Medium",
    Priority::Low => "Low",
  }
}

pub fn decode_priority(s: &str) -> Result<Priority> {
  match s {
    "High" => Ok(Priority::High),
    "Medium" => Ok(Priority::Medium),
    "Low" => Ok(Priority::Low),
    other => Err(Error::Decode(format!("unknown priority: {other:?}"))),
  }
}

// ─── EventKind ───────────────────────────────────────────────────────────────

pub fn encode_event_kind(k: EventKind) -> &'static str {
  match k {
    EventKind::Workshop => "Workshop",
    EventKind::Hackathon => "Hackathon",
    EventKind::Meet => "Meet",
    EventKind::Event => "Event",
  }
}

pub fn decode_event_kind(s: &str) -> Result<EventKind> {
  match s {
    "Workshop" => Ok(EventKind::Workshop),
    "Hackathon" => Ok(EventKind::Hackathon),
    "Meet" => Ok(EventKind::Meet),
    "Event" => Ok(EventKind::Event),
    other => Err(Error::Decode(format!("unknown event kind: {other:?}"))),
  }
}

// ─── TaskStatus ──────────────────────────────────────────────────────────────

pub fn encode_task_status(s: TaskStatus) -> &'static str {
  match s {
    TaskStatus::Upcoming => "Upcoming",
    TaskStatus::Today => "Today",
    TaskStatus::Completed => "Completed",
  }
}

pub fn decode_task_status(s: &str) -> Result<TaskStatus> {
  match s {
    "Upcoming" => Ok(TaskStatus::Upcoming),
    "Today" => Ok(TaskStatus::Today),
    "Completed" => Ok(TaskStatus::Completed),
    other => Err(Error::Decode(format!("unknown task status: {other:?}"))),
  }
}

// ─── AttendanceStatus ────────────────────────────────────────────────────────

pub fn encode_attendance_status(s: AttendanceStatus) -> &'static str {
  match s {
    AttendanceStatus::Present => "Present",
    AttendanceStatus::Absent => "Absent",
  }
}

pub fn decode_attendance_status(s: &str) -> Result<AttendanceStatus> {
  match s {
    "Present" => Ok(AttendanceStatus::Present),
    "Absent" => Ok(AttendanceStatus::Absent),
    other => {
      Err(Error::Decode(format!("unknown attendance status: {other:?}")))
    }
  }
}

// ─── Department ──────────────────────────────────────────────────────────────

pub fn encode_department(d: Department) -> &'static str {
  match d {
    Department::Tech => "Tech",
    Department::Marketing => "Marketing",
    Department::Content => "Content",
    Department::Media => "Media",
  }
}

pub fn decode_department(s: &str) -> Result<Department> {
  match s {
    "Tech" => Ok(Department::Tech),
    "Marketing" => Ok(Department::Marketing),
    "Content" => Ok(Department::Content),
    "Media" => Ok(Department::Media),
    other => Err(Error::Decode(format!("unknown department: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub uid:   String,
  pub name:  String,
  pub email: String,
  pub role:  String,
}

impl RawUser {
  pub fn into_identity(self) -> Result<Identity> {
    Ok(Identity {
      uid:   decode_uuid(&self.uid)?,
      name:  self.name,
      email: self.email,
      role:  decode_role(&self.role)?,
    })
  }
}

/// Raw strings read directly from an `events` row.
pub struct RawEvent {
  pub id:          String,
  pub title:       String,
  pub description: String,
  pub kind:        String,
  pub priority:    String,
  pub date:        String,
  pub time:        String,
  pub venue:       String,
  pub created_at:  String,
  pub created_by:  String,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:          decode_uuid(&self.id)?,
      title:       self.title,
      description: self.description,
      kind:        decode_event_kind(&self.kind)?,
      priority:    decode_priority(&self.priority)?,
      date:        decode_date(&self.date)?,
      time:        decode_time(&self.time)?,
      venue:       self.venue,
      created_at:  decode_dt(&self.created_at)?,
      created_by:  decode_uuid(&self.created_by)?,
    })
  }
}

/// Raw strings read directly from an `announcements` row.
pub struct RawAnnouncement {
  pub id:         String,
  pub title:      String,
  pub content:    String,
  pub priority:   String,
  pub created_at: String,
  pub created_by: String,
}

impl RawAnnouncement {
  pub fn into_announcement(self) -> Result<Announcement> {
    Ok(Announcement {
      id:         decode_uuid(&self.id)?,
      title:      self.title,
      content:    self.content,
      priority:   decode_priority(&self.priority)?,
      created_at: decode_dt(&self.created_at)?,
      created_by: decode_uuid(&self.created_by)?,
    })
  }
}

/// Raw strings read directly from a `tasks` row.
pub struct RawTask {
  pub id:          String,
  pub title:       String,
  pub description: String,
  pub event_id:    String,
  pub domain:      String,
  pub priority:    String,
  pub status:      String,
  pub assigned_to: Option<String>,
  pub due_date:    String,
  pub created_at:  String,
  pub created_by:  String,
}

impl RawTask {
  pub fn into_task(self) -> Result<Task> {
    Ok(Task {
      id:          decode_uuid(&self.id)?,
      title:       self.title,
      description: self.description,
      event_id:    decode_uuid(&self.event_id)?,
      domain:      self.domain,
      priority:    decode_priority(&self.priority)?,
      status:      decode_task_status(&self.status)?,
      assigned_to: self.assigned_to,
      due_date:    decode_date(&self.due_date)?,
      created_at:  decode_dt(&self.created_at)?,
      created_by:  decode_uuid(&self.created_by)?,
    })
  }
}

/// Raw strings read directly from an `attendance` row.
pub struct RawAttendance {
  pub id:        String,
  pub event_id:  String,
  pub user_id:   String,
  pub status:    String,
  pub marked_by: String,
  pub marked_at: String,
}

impl RawAttendance {
  pub fn into_attendance(self) -> Result<Attendance> {
    Ok(Attendance {
      id:        decode_uuid(&self.id)?,
      event_id:  decode_uuid(&self.event_id)?,
      user_id:   decode_uuid(&self.user_id)?,
      status:    decode_attendance_status(&self.status)?,
      marked_by: decode_uuid(&self.marked_by)?,
      marked_at: decode_dt(&self.marked_at)?,
    })
  }
}

/// Raw strings read directly from a `resources` row.
pub struct RawResource {
  pub id:          String,
  pub department:  String,
  pub title:       String,
  pub description: String,
  pub url:         String,
  pub created_at:  String,
  pub created_by:  String,
}

impl RawResource {
  pub fn into_resource(self) -> Result<Resource> {
    Ok(Resource {
      id:          decode_uuid(&self.id)?,
      department:  decode_department(&self.department)?,
      title:       self.title,
      description: self.description,
      url:         self.url,
      created_at:  decode_dt(&self.created_at)?,
      created_by:  decode_uuid(&self.created_by)?,
    })
  }
}

/// Raw values read directly from a `feedback` row.
pub struct RawFeedback {
  pub id:         String,
  pub event_id:   String,
  pub user_id:    String,
  pub rating:     i64,
  pub comments:   String,
  pub created_at: String,
}

impl RawFeedback {
  pub fn into_feedback(self) -> Result<Feedback> {
    let rating = u8::try_from(self.rating)
      .map_err(|_| Error::Decode(format!("rating out of range: {}", self.rating)))?;
    Ok(Feedback {
      id:         decode_uuid(&self.id)?,
      event_id:   decode_uuid(&self.event_id)?,
      user_id:    decode_uuid(&self.user_id)?,
      rating,
      comments:   self.comments,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
