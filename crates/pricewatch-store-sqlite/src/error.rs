//! Error type for `pricewatch-store-sqlite`.

use pricewatch_core::{Classify, ErrorKind};
use rusqlite::{ErrorCode, ffi};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] pricewatch_core::Error),

  /// A UNIQUE or PRIMARY KEY constraint rejected the write. Carries SQLite's
  /// message, which names the offending table and columns.
  #[error("unique constraint violated: {0}")]
  UniqueViolation(String),

  #[error("foreign key constraint violated: {0}")]
  ForeignKeyViolation(String),

  #[error("product {product_id} not found in user {user_id}'s watchlist")]
  NotInWatchlist { user_id: i64, product_id: i64 },

  #[error("product not found: {0}")]
  ProductNotFound(i64),

  #[error("database error: {0}")]
  Database(#[source] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[source] rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    let constraint = match &e {
      rusqlite::Error::SqliteFailure(failure, _)
        if failure.code == ErrorCode::ConstraintViolation =>
      {
        Some(failure.extended_code)
      }
      _ => None,
    };

    match constraint {
      Some(ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => {
        Self::UniqueViolation(e.to_string())
      }
      Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
        Self::ForeignKeyViolation(e.to_string())
      }
      _ => Self::Sqlite(e),
    }
  }
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(inner) => inner.into(),
      other => Self::Database(other),
    }
  }
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Core(e) => e.kind(),
      Self::UniqueViolation(_) => ErrorKind::UniqueViolation,
      Self::ForeignKeyViolation(_) => ErrorKind::ForeignKeyViolation,
      Self::NotInWatchlist { .. } | Self::ProductNotFound(_) => ErrorKind::NotFound,
      Self::Database(_) | Self::Sqlite(_) | Self::DateParse(_) => ErrorKind::Other,
    }
  }
}
