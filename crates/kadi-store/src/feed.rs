//! [`FeedStore`] — owns the published feed and its interactions.
//!
//! The store is the only writer of like/favorite/comment state. All
//! operations mutate under one lock, so no caller ever observes a
//! partially-updated card. The ambient like-growth timer is a single
//! cancellable tokio task owned by the store and torn down with it.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use kadi_core::{
  Error, Result,
  card::{DraftCard, FeedCard, ShareOutcome, day_month_label},
  rng::RandomSource,
  templates::COMMENT_TEMPLATES,
};

// ─── Share seam ──────────────────────────────────────────────────────────────

/// How a native share attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDisposition {
  Completed,
  /// The user dismissed the dialog. A normal outcome.
  Cancelled,
}

/// The host environment's native share capability, if any.
pub trait SharePlatform: Send + Sync {
  /// Attempt a native share. `None` means the capability is unavailable
  /// and the caller should fall back to producing a link.
  fn native_share(&self, title: &str, text: &str) -> Option<ShareDisposition>;
}

/// Default platform: no native share capability.
pub struct NoNativeShare;

impl SharePlatform for NoNativeShare {
  fn native_share(&self, _title: &str, _text: &str) -> Option<ShareDisposition> {
    None
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

struct FeedInner {
  cards: Vec<FeedCard>,
  rng:   Box<dyn RandomSource>,
}

/// The ordered collection of published cards. Insertion order is feed
/// order with the newest card at the head.
pub struct FeedStore {
  inner:    Arc<Mutex<FeedInner>>,
  growth:   Mutex<Option<JoinHandle<()>>>,
  platform: Box<dyn SharePlatform>,
  base_url: String,
}

impl FeedStore {
  pub fn new(rng: Box<dyn RandomSource>) -> Self {
    Self {
      inner:    Arc::new(Mutex::new(FeedInner { cards: Vec::new(), rng })),
      growth:   Mutex::new(None),
      platform: Box::new(NoNativeShare),
      base_url: String::new(),
    }
  }

  pub fn with_share_platform(
    mut self,
    platform: Box<dyn SharePlatform>,
  ) -> Self {
    self.platform = platform;
    self
  }

  /// Base URL for copy-link fallbacks, e.g. `http://localhost:8245`.
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Snapshot of the whole feed in feed order.
  pub fn cards(&self) -> Vec<FeedCard> {
    self.inner.lock().cards.clone()
  }

  pub fn get(&self, id: Uuid) -> Result<FeedCard> {
    self
      .inner
      .lock()
      .cards
      .iter()
      .find(|c| c.id == id)
      .cloned()
      .ok_or(Error::CardNotFound(id))
  }

  /// Cards the viewer has liked, in feed order.
  pub fn liked(&self) -> Vec<FeedCard> {
    let inner = self.inner.lock();
    inner
      .cards
      .iter()
      .filter(|c| c.liked_by_viewer)
      .cloned()
      .collect()
  }

  /// Cards the viewer has favorited, in feed order.
  pub fn favorited(&self) -> Vec<FeedCard> {
    let inner = self.inner.lock();
    inner
      .cards
      .iter()
      .filter(|c| c.favorited_by_viewer)
      .cloned()
      .collect()
  }

  /// Cards published under an attribution label, in feed order.
  pub fn by_author(&self, author: &str) -> Vec<FeedCard> {
    let inner = self.inner.lock();
    inner
      .cards
      .iter()
      .filter(|c| c.author == author)
      .cloned()
      .collect()
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Convert a submitted draft into a feed card: counters zeroed, viewer
  /// flags cleared, fresh id, inserted at the head so the newest card
  /// surfaces first. The draft's required fields are revalidated — an
  /// unsubmitted snapshot is rejected before any state changes.
  pub fn publish(&self, draft: &DraftCard, author: &str) -> Result<FeedCard> {
    draft.validate_for_submit()?;
    // validate_for_submit guarantees birth_date is set.
    let date_label =
      draft.birth_date.map(day_month_label).unwrap_or_default();

    let card = FeedCard {
      id:                  Uuid::new_v4(),
      name:                draft.display_name(),
      title:               draft.effective_role().to_owned(),
      date_label,
      message:             draft.message.clone(),
      image:               draft.photo.clone(),
      like_count:          0,
      comment_count:       0,
      liked_by_viewer:     false,
      favorited_by_viewer: false,
      author:              author.to_owned(),
      published_at:        Utc::now(),
    };

    self.inner.lock().cards.insert(0, card.clone());
    tracing::info!(card_id = %card.id, author, "card published");
    Ok(card)
  }

  /// Flip the viewer's like: +1 on false→true, −1 on true→false. The count
  /// saturates at 0 even if called against an already-unliked card.
  pub fn toggle_like(&self, id: Uuid) -> Result<FeedCard> {
    self.mutate(id, |card| {
      card.liked_by_viewer = !card.liked_by_viewer;
      if card.liked_by_viewer {
        card.like_count += 1;
      } else {
        card.like_count = card.like_count.saturating_sub(1);
      }
    })
  }

  /// Flip the viewer's favorite flag; counts are untouched.
  pub fn toggle_favorite(&self, id: Uuid) -> Result<FeedCard> {
    self.mutate(id, |card| {
      card.favorited_by_viewer = !card.favorited_by_viewer;
    })
  }

  /// Increment the comment count and return a generated comment for
  /// display. Comment text is advisory only — no per-comment log is kept,
  /// just the count.
  pub fn add_comment(&self, id: Uuid) -> Result<(FeedCard, String)> {
    let mut inner = self.inner.lock();
    let FeedInner { cards, rng } = &mut *inner;
    let card = match cards.iter_mut().find(|c| c.id == id) {
      Some(card) => card,
      None => {
        tracing::warn!(card_id = %id, "comment on unknown card rejected");
        return Err(Error::CardNotFound(id));
      }
    };
    card.comment_count += 1;
    let comment =
      COMMENT_TEMPLATES[rng.next_in(COMMENT_TEMPLATES.len())].to_owned();
    Ok((card.clone(), comment))
  }

  /// Share a card through the host platform, falling back to a copy-link
  /// result when no native capability exists. Mutates nothing; a cancelled
  /// native dialog is a normal outcome.
  pub fn share(&self, id: Uuid) -> Result<ShareOutcome> {
    let card = self.get(id)?;
    let title = format!("Joyeux anniversaire {}!", card.name);
    match self.platform.native_share(&title, &card.message) {
      Some(ShareDisposition::Completed) => Ok(ShareOutcome::Shared),
      Some(ShareDisposition::Cancelled) => Ok(ShareOutcome::Cancelled),
      None => Ok(ShareOutcome::LinkCopied {
        link: format!(
          "{}/cards/{}",
          self.base_url.trim_end_matches('/'),
          card.id
        ),
      }),
    }
  }

  fn mutate(
    &self,
    id: Uuid,
    apply: impl FnOnce(&mut FeedCard),
  ) -> Result<FeedCard> {
    let mut inner = self.inner.lock();
    match inner.cards.iter_mut().find(|c| c.id == id) {
      Some(card) => {
        apply(card);
        Ok(card.clone())
      }
      None => {
        tracing::warn!(card_id = %id, "operation on unknown card rejected");
        Err(Error::CardNotFound(id))
      }
    }
  }

  // ── Ambient growth ────────────────────────────────────────────────────

  /// Start the ambient engagement timer: once per `every`, each card's
  /// like count grows by an independent random 1–3. One periodic task;
  /// ticks never overlap (the tick body completes before the next await),
  /// and restarting replaces the previous task.
  pub fn start_ambient_growth(&self, every: Duration) {
    let inner = Arc::clone(&self.inner);
    let handle = tokio::spawn(async move {
      let mut ticker = tokio::time::interval(every);
      ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
      // The first tick of an interval completes immediately; consume it so
      // growth begins one full period after start.
      ticker.tick().await;
      loop {
        ticker.tick().await;
        let mut inner = inner.lock();
        let FeedInner { cards, rng } = &mut *inner;
        for card in cards.iter_mut() {
          card.like_count += rng.next_in(3) as u32 + 1;
        }
        tracing::debug!(cards = cards.len(), "ambient like growth applied");
      }
    });

    if let Some(previous) = self.growth.lock().replace(handle) {
      previous.abort();
    }
  }

  /// Stop the ambient growth task. Idempotent; also runs on drop so no
  /// timer outlives the store.
  pub fn shutdown(&self) {
    if let Some(handle) = self.growth.lock().take() {
      handle.abort();
    }
  }

  // ── Demo content ──────────────────────────────────────────────────────

  /// Seed the feed with the community's demo cards.
  pub fn seed_demo(&self) {
    let demo = [
      (
        "Josh R. Josias",
        "Website Developer",
        "06 JULY",
        "To our Website Dev and Help Lead, thank you for your dedication \
         and leadership. Wishing you a fantastic year ahead! 🎉",
        127,
        23,
        false,
        false,
        "GDG Team",
      ),
      (
        "Sarah M. Kamau",
        "UI/UX Designer",
        "15 MARCH",
        "Happy Birthday to our amazing UI/UX Designer! Your creativity and \
         vision inspire us all. Have a wonderful day! ✨",
        89,
        16,
        true,
        false,
        "Design Team",
      ),
      (
        "Alex K. Muteba",
        "Flutter Lead",
        "22 AUGUST",
        "Celebrating our Flutter Lead today! Thank you for guiding our \
         mobile development journey. Cheers to another amazing year! 🚀",
        156,
        31,
        false,
        true,
        "Mobile Team",
      ),
    ];

    let mut inner = self.inner.lock();
    for (name, title, date, message, likes, comments, liked, fav, author) in
      demo
    {
      inner.cards.push(FeedCard {
        id:                  Uuid::new_v4(),
        name:                name.to_owned(),
        title:               title.to_owned(),
        date_label:          date.to_owned(),
        message:             message.to_owned(),
        image:               None,
        like_count:          likes,
        comment_count:       comments,
        liked_by_viewer:     liked,
        favorited_by_viewer: fav,
        author:              author.to_owned(),
        published_at:        Utc::now(),
      });
    }
  }
}

impl Drop for FeedStore {
  fn drop(&mut self) {
    self.shutdown();
  }
}
