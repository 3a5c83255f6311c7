//! SQL schema for the Pricewatch SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

-- One row per distinct product name, shared by every watcher.
CREATE TABLE IF NOT EXISTS products (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    product_name    TEXT NOT NULL UNIQUE,
    image_url       TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL,
    last_checked_at TEXT             -- NULL until the first snapshot lands
);

CREATE TABLE IF NOT EXISTS user_watchlist (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id)    ON DELETE CASCADE,
    product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    added_at   TEXT NOT NULL,
    UNIQUE (user_id, product_id)
);

CREATE TABLE IF NOT EXISTS product_sources (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id          INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    platform            TEXT NOT NULL,
    platform_product_id TEXT NOT NULL,
    product_url         TEXT NOT NULL,
    UNIQUE (product_id, platform)
);

-- Snapshots are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS price_snapshots (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    product_source_id INTEGER NOT NULL REFERENCES product_sources(id) ON DELETE CASCADE,
    price             REAL    NOT NULL,
    currency          TEXT    NOT NULL DEFAULT 'USD',
    in_stock          INTEGER NOT NULL,
    checked_at        TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS watchlist_user_idx   ON user_watchlist(user_id, added_at);
CREATE INDEX IF NOT EXISTS snapshots_source_idx ON price_snapshots(product_source_id, checked_at);

PRAGMA user_version = 1;
";
