//! [`DraftBuilder`] — owns the card under composition.
//!
//! Field updates carry no validation; everything is checked at submit.
//! The draft moves `Empty -> Editing -> Submitted`; Submitted is terminal
//! for the instance, and a reset starts the next empty draft.

use chrono::NaiveDate;

use kadi_core::{
  Error, Result,
  card::DraftCard,
  rng::RandomSource,
  role::CUSTOM_ROLE,
  templates::{WISH_TEMPLATES, render_wish},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
  Empty,
  Editing,
  Submitted,
}

pub struct DraftBuilder {
  card:  DraftCard,
  state: DraftState,
  rng:   Box<dyn RandomSource>,
}

impl DraftBuilder {
  pub fn new(rng: Box<dyn RandomSource>) -> Self {
    Self {
      card: DraftCard::default(),
      state: DraftState::Empty,
      rng,
    }
  }

  pub fn state(&self) -> DraftState {
    self.state
  }

  pub fn card(&self) -> &DraftCard {
    &self.card
  }

  /// Every mutation runs through here: rejected once submitted, and the
  /// first write moves an empty draft into Editing.
  fn edit(&mut self) -> Result<&mut DraftCard> {
    if self.state == DraftState::Submitted {
      return Err(Error::AlreadySubmitted);
    }
    self.state = DraftState::Editing;
    Ok(&mut self.card)
  }

  // ── Field updates ─────────────────────────────────────────────────────

  pub fn set_first_name(&mut self, value: impl Into<String>) -> Result<()> {
    self.edit()?.first_name = value.into();
    Ok(())
  }

  pub fn set_last_name(&mut self, value: impl Into<String>) -> Result<()> {
    self.edit()?.last_name = value.into();
    Ok(())
  }

  pub fn set_birth_date(&mut self, value: Option<NaiveDate>) -> Result<()> {
    self.edit()?.birth_date = value;
    Ok(())
  }

  pub fn set_photo(&mut self, value: Option<String>) -> Result<()> {
    self.edit()?.photo = value;
    Ok(())
  }

  pub fn set_message(&mut self, value: impl Into<String>) -> Result<()> {
    self.edit()?.message = value.into();
    Ok(())
  }

  pub fn set_keywords(&mut self, value: impl Into<String>) -> Result<()> {
    self.edit()?.keywords = value.into();
    Ok(())
  }

  pub fn set_custom_role(&mut self, value: impl Into<String>) -> Result<()> {
    self.edit()?.custom_role = Some(value.into());
    Ok(())
  }

  /// Selecting the [`CUSTOM_ROLE`] sentinel clears the listed role and
  /// leaves the free-text role to be filled separately; any other value
  /// becomes the listed role and clears the free-text one.
  pub fn select_role(&mut self, value: &str) -> Result<()> {
    let card = self.edit()?;
    if value == CUSTOM_ROLE {
      card.role = None;
    } else {
      card.role = Some(value.to_owned());
      card.custom_role = None;
    }
    Ok(())
  }

  // ── Suggestion ────────────────────────────────────────────────────────

  /// Pick a wish template and interpolate the draft's values into it. The
  /// result becomes the draft message and is returned for display.
  pub fn suggest_message(&mut self, keywords: &str) -> Result<String> {
    if keywords.trim().is_empty() {
      return Err(Error::EmptyField { field: "keywords" });
    }
    self.edit()?.keywords = keywords.trim().to_owned();

    let template = WISH_TEMPLATES[self.rng.next_in(WISH_TEMPLATES.len())];
    let message = render_wish(
      template,
      &self.card.first_name,
      self.card.effective_role(),
      &self.card.keywords,
    );
    self.card.message = message.clone();
    Ok(message)
  }

  // ── Submit / reset ────────────────────────────────────────────────────

  /// Validate and return an immutable snapshot for publishing. The draft
  /// itself is not cleared — conversion and cleanup are the caller's
  /// concern. Idempotent once submitted.
  pub fn submit(&mut self) -> Result<DraftCard> {
    if self.state == DraftState::Submitted {
      return Ok(self.card.clone());
    }
    self.card.validate_for_submit()?;
    self.state = DraftState::Submitted;
    Ok(self.card.clone())
  }

  /// Discard the draft and start the next empty one.
  pub fn reset(&mut self) {
    self.card = DraftCard::default();
    self.state = DraftState::Empty;
  }
}
