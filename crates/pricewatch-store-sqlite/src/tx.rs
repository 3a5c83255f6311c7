//! Transaction scoping for multi-statement units of work.
//!
//! A unit of work either commits as a whole or leaves the database exactly as
//! it found it. Errors are handed back untouched; nothing is retried.

use rusqlite::{Transaction, TransactionBehavior};

use crate::Result;

/// Run a writing `work` inside one transaction on the connection's background
/// thread.
///
/// The transaction is begun `IMMEDIATE` so that concurrent writers on other
/// connections queue on the write lock instead of failing mid-transaction.
///
/// The closure runs to completion even if the returned future is dropped, so
/// a cancelled caller never leaves a transaction open: it is either committed
/// or rolled back on the database thread.
pub async fn with_transaction<T, F>(
  conn: &tokio_rusqlite::Connection,
  work: F,
) -> Result<T>
where
  F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  T: Send + 'static,
{
  with_behavior(conn, TransactionBehavior::Immediate, work).await
}

/// Run a read-only `work` inside one `DEFERRED` transaction.
///
/// No write lock is taken, so under WAL the reads see one consistent snapshot
/// and proceed while another connection holds the write lock.
pub async fn with_read_transaction<T, F>(
  conn: &tokio_rusqlite::Connection,
  work: F,
) -> Result<T>
where
  F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  T: Send + 'static,
{
  with_behavior(conn, TransactionBehavior::Deferred, work).await
}

async fn with_behavior<T, F>(
  conn:     &tokio_rusqlite::Connection,
  behavior: TransactionBehavior,
  work:     F,
) -> Result<T>
where
  F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  T: Send + 'static,
{
  conn
    .call(move |conn| Ok(run_in_transaction(conn, behavior, work)))
    .await?
}

/// Synchronous core of [`with_transaction`] and [`with_read_transaction`].
///
/// An uncommitted [`Transaction`] rolls back when dropped, which covers the
/// error path and a failed `COMMIT` alike.
pub fn run_in_transaction<T, F>(
  conn:     &mut rusqlite::Connection,
  behavior: TransactionBehavior,
  work:     F,
) -> Result<T>
where
  F: FnOnce(&Transaction<'_>) -> Result<T>,
{
  let tx = conn.transaction_with_behavior(behavior)?;
  let value = work(&tx)?;
  tx.commit()?;
  Ok(value)
}
