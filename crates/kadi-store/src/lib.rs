//! The kadi domain stores.
//!
//! Three store objects own all mutable domain state; the surrounding
//! interface layer (HTTP handlers, a future UI) reads their state and calls
//! their operations, never mutating cards or sessions directly.
//!
//! - [`SessionStore`] — the authenticated member, backed by a
//!   [`kadi_core::session::SessionBackend`].
//! - [`DraftBuilder`] — the one card under composition.
//! - [`FeedStore`] — the published feed and its interactions, including the
//!   ambient like-growth timer.

pub mod draft;
pub mod feed;
pub mod session;

pub use draft::{DraftBuilder, DraftState};
pub use feed::{FeedStore, NoNativeShare, ShareDisposition, SharePlatform};
pub use session::SessionStore;
