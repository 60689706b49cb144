//! SQL schema for the NailLock SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per (partition, day). Saving a day again replaces the row.
-- Derived values (score, streak, level) are never stored here.
CREATE TABLE IF NOT EXISTS daily_log (
    partition    TEXT NOT NULL,
    day          TEXT NOT NULL,               -- YYYY-MM-DD
    actions_json TEXT NOT NULL DEFAULT '{}',  -- action key -> bool
    notes        TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (partition, day)
);

-- Photos are inserted and deleted, never updated.
-- `day` joins to daily_log by value only; there is no foreign key.
CREATE TABLE IF NOT EXISTS photos (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    partition TEXT NOT NULL,
    day       TEXT NOT NULL,
    kind      TEXT NOT NULL CHECK (kind IN ('before', 'after', 'weekly')),
    filename  TEXT NOT NULL DEFAULT '',
    mime      TEXT NOT NULL,
    data      BLOB NOT NULL
);

CREATE INDEX IF NOT EXISTS photos_partition_day_idx ON photos(partition, day, id);

PRAGMA user_version = 1;
";
