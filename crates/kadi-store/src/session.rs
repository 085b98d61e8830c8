//! [`SessionStore`] — owns the authenticated member.

use std::{
  sync::atomic::{AtomicU64, Ordering},
  time::Duration,
};

use parking_lot::Mutex;

use kadi_core::{
  Error, Result,
  member::Member,
  session::{SessionBackend, SessionRecord},
};

/// Verification latency simulated by [`SessionStore::authenticate`].
pub const DEFAULT_VERIFICATION_DELAY: Duration = Duration::from_millis(2000);

/// Owns the [`Member`] for this process and the durable session record.
///
/// At most one authenticate call is effective at a time: a call that starts
/// while another is pending supersedes it — the superseded call returns
/// [`Error::VerificationSuperseded`] and persists nothing.
pub struct SessionStore<B> {
  backend: B,
  current: Mutex<Option<Member>>,
  /// Claimed at the start of each authenticate; a call whose claim is stale
  /// after the verification delay has been superseded.
  epoch:   AtomicU64,
  delay:   Duration,
}

impl<B: SessionBackend> SessionStore<B> {
  pub fn new(backend: B) -> Self {
    Self {
      backend,
      current: Mutex::new(None),
      epoch: AtomicU64::new(0),
      delay: DEFAULT_VERIFICATION_DELAY,
    }
  }

  /// Override the simulated verification delay (zero disables it).
  pub fn with_verification_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  /// Verify and install a member. Validates before any side effect, waits
  /// out the verification delay, persists the record, and returns the
  /// member. Given the same inputs the result is the same — the only side
  /// effects are persistence and the in-memory install.
  pub async fn authenticate(
    &self,
    contact_id: &str,
    display_name: &str,
    photo: Option<String>,
  ) -> Result<Member> {
    let contact_id = contact_id.trim();
    let display_name = display_name.trim();
    if contact_id.is_empty() {
      return Err(Error::EmptyField { field: "contact id" });
    }
    if display_name.is_empty() {
      return Err(Error::EmptyField { field: "display name" });
    }

    let claim = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
    tokio::time::sleep(self.delay).await;
    if self.epoch.load(Ordering::SeqCst) != claim {
      return Err(Error::VerificationSuperseded);
    }

    let member = Member {
      contact_id:   contact_id.to_owned(),
      display_name: display_name.to_owned(),
      photo,
    };

    self
      .backend
      .save(&SessionRecord::from(&member))
      .await
      .map_err(|e| Error::Persistence(Box::new(e)))?;

    *self.current.lock() = Some(member.clone());
    tracing::info!(contact_id, "member authenticated");
    Ok(member)
  }

  /// Load the persisted member, if any. Backend failures are logged and
  /// swallowed — a broken record means an unauthenticated start, never a
  /// user-facing error.
  pub async fn restore(&self) -> Option<Member> {
    match self.backend.load().await {
      Ok(Some(record)) => {
        let member = Member::from(record);
        *self.current.lock() = Some(member.clone());
        Some(member)
      }
      Ok(None) => None,
      Err(e) => {
        tracing::warn!(error = %e, "session restore failed; starting unauthenticated");
        None
      }
    }
  }

  /// The member authenticated or restored this session.
  pub fn current(&self) -> Option<Member> {
    self.current.lock().clone()
  }
}
