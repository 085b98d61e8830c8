//! SQL schema for the kadi session store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The durable session record. At most one row ever exists (slot 0); an
-- authenticate overwrites it, a logout or corrupt load deletes it.
CREATE TABLE IF NOT EXISTS session (
    slot        INTEGER PRIMARY KEY CHECK (slot = 0),
    record_json TEXT NOT NULL,   -- JSON-encoded SessionRecord
    saved_at    TEXT NOT NULL    -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
