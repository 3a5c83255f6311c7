//! Error types for `pricewatch-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("product name {0:?} is too short")]
  ProductNameTooShort(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The closed set of failure classes a storage backend reports.
///
/// Backends translate their native error codes into one of these so that
/// callers (e.g. the HTTP layer) can branch on the variant instead of
/// inspecting driver-specific codes or messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A uniqueness constraint rejected the write (e.g. already watching).
  UniqueViolation,
  /// A referenced row does not exist (e.g. unknown user).
  ForeignKeyViolation,
  /// A targeted mutation matched no rows.
  NotFound,
  /// The caller supplied input the domain rejects.
  Invalid,
  /// Connectivity, I/O, decoding, or anything else.
  Other,
}

/// Implemented by every store error type.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::ProductNameTooShort(_) => ErrorKind::Invalid,
    }
  }
}
