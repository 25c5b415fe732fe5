//! SQL schema for the Quorum SQLite store.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`. Future migrations will be gated on
//! `PRAGMA user_version`.
//!
//! `event_id` columns deliberately carry no REFERENCES clause: they are weak
//! references. Deleting an event leaves dependent tasks, attendance and
//! feedback rows in place, and the projections render them as "unknown
//! event".

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    uid    TEXT PRIMARY KEY,
    name   TEXT NOT NULL,
    email  TEXT NOT NULL,
    role   TEXT NOT NULL    -- 'EB' | 'EC' | 'Core' | 'Member'
);

CREATE TABLE IF NOT EXISTS events (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    kind        TEXT NOT NULL,   -- 'Workshop' | 'Hackathon' | 'Meet' | 'Event'
    priority    TEXT NOT NULL,   -- 'High' | 'Medium' | 'Low'
    date        TEXT NOT NULL,   -- ISO 8601 calendar date
    time        TEXT NOT NULL,   -- HH:MM:SS
    venue       TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; store-assigned
    created_by  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS announcements (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    priority    TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    created_by  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tasks (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    event_id    TEXT NOT NULL,   -- weak reference
    domain      TEXT NOT NULL,
    priority    TEXT NOT NULL,
    status      TEXT NOT NULL,   -- 'Upcoming' | 'Today' | 'Completed'
    assigned_to TEXT,
    due_date    TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    created_by  TEXT NOT NULL
);

-- Append-only; one record per (event, user).
CREATE TABLE IF NOT EXISTS attendance (
    id         TEXT PRIMARY KEY,
    event_id   TEXT NOT NULL,    -- weak reference
    user_id    TEXT NOT NULL,
    status     TEXT NOT NULL,    -- 'Present' | 'Absent'
    marked_by  TEXT NOT NULL,
    marked_at  TEXT NOT NULL,
    UNIQUE (event_id, user_id)
);

CREATE TABLE IF NOT EXISTS resources (
    id          TEXT PRIMARY KEY,
    department  TEXT NOT NULL,   -- 'Tech' | 'Marketing' | 'Content' | 'Media'
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    url         TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    created_by  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS feedback (
    id          TEXT PRIMARY KEY,
    event_id    TEXT NOT NULL,   -- weak reference
    user_id     TEXT NOT NULL,
    rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comments    TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS attendance_event_idx ON attendance(event_id);
CREATE INDEX IF NOT EXISTS feedback_event_idx   ON feedback(event_id);
CREATE INDEX IF NOT EXISTS tasks_event_idx      ON tasks(event_id);

PRAGMA user_version = 1;
";
