//! Member — the authenticated community member.
//!
//! One member is active per session at most. The contact identifier is the
//! member's identity for the session and never changes once set.

use serde::{Deserialize, Serialize};

/// The authenticated member, as held in memory by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  /// Phone-number-like identifier, e.g. `+243 970 000 000`. Immutable.
  pub contact_id:   String,
  /// Name the member is known by in the community.
  pub display_name: String,
  /// Opaque binary-as-text blob (e.g. a base64 data URI). Never decoded.
  pub photo:        Option<String>,
}
