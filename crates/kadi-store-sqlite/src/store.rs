//! [`SqliteSessionBackend`] — the SQLite implementation of
//! [`SessionBackend`].

use std::{future::Future, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use kadi_core::session::{
  SESSION_RECORD_VERSION, SessionBackend, SessionRecord,
};

use crate::{Error, Result, schema::SCHEMA};

/// The kadi session record backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteSessionBackend {
  conn: tokio_rusqlite::Connection,
}

impl SqliteSessionBackend {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_owned();
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

  async fn delete_record(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM session", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl SessionBackend for SqliteSessionBackend {
  type Error = Error;

  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<SessionRecord>>> + Send + '_ {
    async move {
      let raw: Option<String> = self
        .conn
        .call(|conn| {
          Ok(
            conn
              .query_row(
                "SELECT record_json FROM session WHERE slot = 0",
                [],
                |row| row.get(0),
              )
              .optional()?,
          )
        })
        .await?;

      let Some(json) = raw else {
        return Ok(None);
      };

      // A record we cannot use is discarded, not surfaced: the caller
      // simply starts unauthenticated.
      match serde_json::from_str::<SessionRecord>(&json) {
        Ok(record) if record.version == SESSION_RECORD_VERSION => {
          Ok(Some(record))
        }
        Ok(record) => {
          tracing::warn!(
            version = record.version,
            "discarding session record with unsupported version"
          );
          self.delete_record().await?;
          Ok(None)
        }
        Err(e) => {
          tracing::warn!(error = %e, "discarding unparsable session record");
          self.delete_record().await?;
          Ok(None)
        }
      }
    }
  }

  fn save<'a>(
    &'a self,
    record: &'a SessionRecord,
  ) -> impl Future<Output = Result<()>> + Send + 'a {
    let json = serde_json::to_string(record);
    async move {
      let json = json?;
      let saved_at = Utc::now().to_rfc3339();
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO session (slot, record_json, saved_at)
             VALUES (0, ?1, ?2)
             ON CONFLICT(slot) DO UPDATE SET
               record_json = excluded.record_json,
               saved_at    = excluded.saved_at",
            rusqlite::params![json, saved_at],
          )?;
          Ok(())
        })
        .await?;
      Ok(())
    }
  }

  fn clear(&self) -> impl Future<Output = Result<()>> + Send + '_ {
    async move { self.delete_record().await }
  }
}
