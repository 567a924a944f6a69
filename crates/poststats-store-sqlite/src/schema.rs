//! SQL schema for the poststats SQLite store.
//!
//! Executed once at connection startup. The revision set is only ever
//! replaced as a whole, so there are no migrations.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per observed revision. Several rows share a post_id; the row
-- with the highest version is that post's current state.
CREATE TABLE IF NOT EXISTS posts (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id   INTEGER NOT NULL,
    topic     TEXT    NOT NULL,
    likes     INTEGER NOT NULL,   -- -1 = not measured
    shares    INTEGER NOT NULL,   -- -1 = not measured
    comments  INTEGER NOT NULL,   -- -1 = not measured
    version   INTEGER NOT NULL CHECK (version >= 0),
    timestamp TEXT    NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS posts_post_id_idx ON posts(post_id);
CREATE INDEX IF NOT EXISTS posts_topic_idx   ON posts(topic);

PRAGMA user_version = 1;
";
