//! The durable session record and the `SessionBackend` trait.
//!
//! The trait is implemented by storage backends (e.g. `kadi-store-sqlite`).
//! Higher layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::member::Member;

/// Current on-disk shape of [`SessionRecord`]. Records carrying any other
/// version are discarded on load.
pub const SESSION_RECORD_VERSION: u32 = 1;

// ─── Record ──────────────────────────────────────────────────────────────────

/// The single persisted session record: a [`Member`] plus a version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
  pub version:      u32,
  pub contact_id:   String,
  pub display_name: String,
  pub photo:        Option<String>,
}

impl From<&Member> for SessionRecord {
  fn from(m: &Member) -> Self {
    Self {
      version:      SESSION_RECORD_VERSION,
      contact_id:   m.contact_id.clone(),
      display_name: m.display_name.clone(),
      photo:        m.photo.clone(),
    }
  }
}

impl From<SessionRecord> for Member {
  fn from(r: SessionRecord) -> Self {
    Self {
      contact_id:   r.contact_id,
      display_name: r.display_name,
      photo:        r.photo,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the durable store for the single session record.
///
/// An unparsable stored record is not an error: `load` must discard it
/// (delete the record, log a warning) and return `Ok(None)` so the caller
/// simply treats the user as unauthenticated.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SessionBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the persisted record, if any. Corrupt records are discarded, not
  /// surfaced.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<SessionRecord>, Self::Error>> + Send + '_;

  /// Write (or overwrite) the record.
  fn save<'a>(
    &'a self,
    record: &'a SessionRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the record entirely.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
