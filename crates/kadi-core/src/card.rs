//! Card types — the draft under composition and the published feed card.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Glyph substituted for a missing name part when deriving initials.
pub const INITIAL_PLACEHOLDER: char = '•';

// ─── DraftCard ───────────────────────────────────────────────────────────────

/// The in-progress card being composed. At most one exists per composition
/// session; all fields accept any input — validation happens at submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftCard {
  pub first_name:  String,
  pub last_name:   String,
  /// Label chosen from the role catalog. Cleared when the custom sentinel
  /// is selected.
  pub role:        Option<String>,
  /// Free-text role, filled when the custom sentinel was selected.
  pub custom_role: Option<String>,
  /// Only day and month are ever rendered; the year carries no meaning.
  pub birth_date:  Option<NaiveDate>,
  /// Opaque binary-as-text blob. Never decoded.
  pub photo:       Option<String>,
  pub message:     String,
  /// Input to message suggestion only; not copied onto the published card.
  pub keywords:    String,
}

impl DraftCard {
  /// The role to render: the listed role wins over the custom one when both
  /// are somehow present.
  pub fn effective_role(&self) -> &str {
    self
      .role
      .as_deref()
      .or(self.custom_role.as_deref())
      .unwrap_or("")
  }

  /// `"First Last"`, as shown on the published card.
  pub fn display_name(&self) -> String {
    format!("{} {}", self.first_name.trim(), self.last_name.trim())
  }

  /// First character of each name part, shown when no photo is set. A
  /// missing part degrades to [`INITIAL_PLACEHOLDER`] rather than failing.
  pub fn initials(&self) -> String {
    let first = |s: &str| s.trim().chars().next().unwrap_or(INITIAL_PLACEHOLDER);
    format!("{}{}", first(&self.first_name), first(&self.last_name))
  }

  /// Required fields still empty or unset, in declaration order.
  pub fn missing_required_fields(&self) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if self.first_name.trim().is_empty() {
      missing.push("first name");
    }
    if self.last_name.trim().is_empty() {
      missing.push("last name");
    }
    if self.birth_date.is_none() {
      missing.push("birth date");
    }
    missing
  }

  /// Submission invariant: first name, last name, and birth date are set.
  pub fn validate_for_submit(&self) -> Result<()> {
    let missing = self.missing_required_fields();
    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::MissingFields(missing))
    }
  }
}

/// Display form of a birth date: `"06 JULY"`, `"15 MARCH"`. No year.
pub fn day_month_label(date: NaiveDate) -> String {
  date.format("%d %B").to_string().to_uppercase()
}

// ─── FeedCard ────────────────────────────────────────────────────────────────

/// A published card in the feed. Feed order is insertion order, newest at
/// the head. Cards are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCard {
  pub id:                  Uuid,
  /// The honoree's full name — distinct from `author`.
  pub name:                String,
  /// Free text once stored; the role catalog constrains authoring only.
  pub title:               String,
  /// Day + month display form, e.g. `"06 JULY"`.
  pub date_label:          String,
  pub message:             String,
  pub image:               Option<String>,
  pub like_count:          u32,
  pub comment_count:       u32,
  /// Per-viewer flags; the service models a single implicit viewer.
  pub liked_by_viewer:     bool,
  pub favorited_by_viewer: bool,
  /// Attribution label for who published the card.
  pub author:              String,
  pub published_at:        DateTime<Utc>,
}

// ─── Share ───────────────────────────────────────────────────────────────────

/// Result of a share request. Cancellation of a native share dialog is a
/// normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShareOutcome {
  /// Delegated to the host's native share capability and completed.
  Shared,
  /// The native share dialog was dismissed by the user.
  Cancelled,
  /// No native capability; a link to the card was produced instead.
  LinkCopied { link: String },
}
