//! JSON API for the kadi birthday-card service.
//!
//! Exposes an axum [`Router`] over the three domain stores. The stores stay
//! the sole owners of mutable state; these handlers translate HTTP intents
//! into store operations and map the domain errors onto status codes.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = kadi_api::api_router(state);
//! ```

pub mod draft;
pub mod error;
pub mod feed;
pub mod session;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use parking_lot::Mutex;
use serde::Deserialize;

use kadi_core::session::SessionBackend;
use kadi_store::{DraftBuilder, FeedStore, SessionStore};

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `KADI_*` environment overrides. Every field has a default so the server
/// runs without a config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "defaults::host")]
  pub host:                  String,
  #[serde(default = "defaults::port")]
  pub port:                  u16,
  /// Base for copy-link share fallbacks.
  #[serde(default = "defaults::base_url")]
  pub base_url:              String,
  /// SQLite file holding the durable session record.
  #[serde(default = "defaults::store_path")]
  pub store_path:            PathBuf,
  /// Simulated verification latency for authenticate.
  #[serde(default = "defaults::verification_delay_ms")]
  pub verification_delay_ms: u64,
  /// Period of the ambient like-growth timer.
  #[serde(default = "defaults::ambient_growth_secs")]
  pub ambient_growth_secs:   u64,
  /// Seed the feed with the community demo cards at startup.
  #[serde(default = "defaults::seed_demo")]
  pub seed_demo:             bool,
}

mod defaults {
  use std::path::PathBuf;

  pub fn host() -> String {
    "127.0.0.1".to_owned()
  }
  pub fn port() -> u16 {
    8245
  }
  pub fn base_url() -> String {
    "http://127.0.0.1:8245".to_owned()
  }
  pub fn store_path() -> PathBuf {
    PathBuf::from("kadi.db")
  }
  pub fn verification_delay_ms() -> u64 {
    2000
  }
  pub fn ambient_growth_secs() -> u64 {
    60
  }
  pub fn seed_demo() -> bool {
    true
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                  defaults::host(),
      port:                  defaults::port(),
      base_url:              defaults::base_url(),
      store_path:            defaults::store_path(),
      verification_delay_ms: defaults::verification_delay_ms(),
      ambient_growth_secs:   defaults::ambient_growth_secs(),
      seed_demo:             defaults::seed_demo(),
    }
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<B: SessionBackend> {
  pub session: Arc<SessionStore<B>>,
  pub draft:   Arc<Mutex<DraftBuilder>>,
  pub feed:    Arc<FeedStore>,
}

// Derived Clone would demand `B: Clone`; the Arcs make that unnecessary.
impl<B: SessionBackend> Clone for AppState<B> {
  fn clone(&self) -> Self {
    Self {
      session: Arc::clone(&self.session),
      draft:   Arc::clone(&self.draft),
      feed:    Arc::clone(&self.feed),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for the stores in `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<B>(state: AppState<B>) -> Router<()>
where
  B: SessionBackend + 'static,
{
  Router::new()
    // Session
    .route(
      "/session",
      get(session::current::<B>).post(session::create::<B>),
    )
    // Draft composition
    .route("/roles", get(draft::roles))
    .route(
      "/draft",
      get(draft::current::<B>)
        .post(draft::update::<B>)
        .delete(draft::reset::<B>),
    )
    .route("/draft/role", post(draft::select_role::<B>))
    .route("/draft/suggest", post(draft::suggest::<B>))
    .route("/draft/submit", post(draft::submit::<B>))
    // Feed
    .route("/cards", get(feed::list::<B>).post(feed::publish::<B>))
    .route("/cards/{id}/like", post(feed::like::<B>))
    .route("/cards/{id}/favorite", post(feed::favorite::<B>))
    .route("/cards/{id}/comments", post(feed::comment::<B>))
    .route("/cards/{id}/share", post(feed::share::<B>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use kadi_core::{rng::ScriptedRandom, templates::COMMENT_TEMPLATES};
  use kadi_store_sqlite::SqliteSessionBackend;

  async fn make_state() -> AppState<SqliteSessionBackend> {
    let backend = SqliteSessionBackend::open_in_memory().await.unwrap();
    AppState {
      session: Arc::new(
        SessionStore::new(backend)
          .with_verification_delay(Duration::ZERO),
      ),
      draft:   Arc::new(Mutex::new(DraftBuilder::new(Box::new(
        ScriptedRandom::new([0]),
      )))),
      feed:    Arc::new(
        FeedStore::new(Box::new(ScriptedRandom::new([0])))
          .with_base_url("http://localhost:8245"),
      ),
    }
  }

  async fn request(
    state: AppState<SqliteSessionBackend>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let req = builder
      .body(match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
      })
      .unwrap();

    let resp = api_router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Full composition flow ───────────────────────────────────────────────

  #[tokio::test]
  async fn end_to_end_compose_and_publish() {
    let state = make_state().await;

    let (status, member) = request(
      state.clone(),
      "POST",
      "/session",
      Some(json!({ "contact_id": "+243900000001", "display_name": "Ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(member["display_name"], "Ada");

    let (status, _) = request(
      state.clone(),
      "POST",
      "/draft",
      Some(json!({
        "first_name": "Ada",
        "last_name": "L",
        "birth_date": "2024-03-15"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, snapshot) =
      request(state.clone(), "POST", "/draft/submit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["first_name"], "Ada");

    let (status, card) = request(
      state.clone(),
      "POST",
      "/cards",
      Some(json!({ "author": "GDG Team" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(card["name"], "Ada L");
    assert_eq!(card["date_label"], "15 MARCH");
    assert_eq!(card["like_count"], 0);
    assert_eq!(card["comment_count"], 0);
    assert_eq!(card["liked_by_viewer"], false);
    assert_eq!(card["favorited_by_viewer"], false);
    assert_eq!(card["author"], "GDG Team");

    let (status, cards) = request(state.clone(), "GET", "/cards", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["id"], card["id"]);

    // Publishing reset the draft for the next composition.
    let (_, draft) = request(state.clone(), "GET", "/draft", None).await;
    assert_eq!(draft["first_name"], "");

    let (status, current) =
      request(state, "GET", "/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["contact_id"], "+243900000001");
  }

  // ── Session ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn authenticate_with_blank_name_returns_400() {
    let state = make_state().await;
    let (status, body) = request(
      state,
      "POST",
      "/session",
      Some(json!({ "contact_id": "+243900000001", "display_name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("display name"));
  }

  #[tokio::test]
  async fn session_before_authentication_returns_404() {
    let state = make_state().await;
    let (status, _) = request(state, "GET", "/session", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Draft ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_with_missing_fields_returns_400() {
    let state = make_state().await;
    let (status, body) =
      request(state, "POST", "/draft/submit", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("missing required fields"));
    assert!(message.contains("first name"));
    assert!(message.contains("birth date"));
  }

  #[tokio::test]
  async fn suggest_fills_the_draft_message() {
    let state = make_state().await;
    request(
      state.clone(),
      "POST",
      "/draft",
      Some(json!({ "first_name": "Ada", "last_name": "L" })),
    )
    .await;
    request(
      state.clone(),
      "POST",
      "/draft/role",
      Some(json!({ "role": "Python Lead" })),
    )
    .await;

    let (status, body) = request(
      state.clone(),
      "POST",
      "/draft/suggest",
      Some(json!({ "keywords": "leadership" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Ada"));
    assert!(message.contains("leadership"));

    let (_, draft) = request(state, "GET", "/draft", None).await;
    assert_eq!(draft["message"], message);
  }

  #[tokio::test]
  async fn suggest_with_blank_keywords_returns_400() {
    let state = make_state().await;
    let (status, _) = request(
      state,
      "POST",
      "/draft/suggest",
      Some(json!({ "keywords": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn custom_role_flow_via_the_sentinel() {
    let state = make_state().await;
    let (status, draft) = request(
      state,
      "POST",
      "/draft/role",
      Some(json!({ "role": "custom", "custom_role": "Storyteller" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["role"], Value::Null);
    assert_eq!(draft["custom_role"], "Storyteller");
  }

  #[tokio::test]
  async fn editing_a_submitted_draft_returns_409() {
    let state = make_state().await;
    request(
      state.clone(),
      "POST",
      "/draft",
      Some(json!({
        "first_name": "Ada",
        "last_name": "L",
        "birth_date": "2024-03-15"
      })),
    )
    .await;
    request(state.clone(), "POST", "/draft/submit", None).await;

    let (status, _) = request(
      state.clone(),
      "POST",
      "/draft",
      Some(json!({ "first_name": "Eve" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A reset clears the way for the next composition.
    let (status, _) = request(state.clone(), "DELETE", "/draft", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = request(
      state,
      "POST",
      "/draft",
      Some(json!({ "first_name": "Eve" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }

  // ── Roles ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn role_catalog_is_ordered_and_carries_the_sentinel() {
    let state = make_state().await;
    let (status, body) = request(state, "GET", "/roles", None).await;
    assert_eq!(status, StatusCode::OK);
    let roles = body["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 17);
    assert_eq!(roles[0], "Website Developer");
    assert_eq!(roles[16], "UI/UX Designer");
    assert_eq!(body["custom_sentinel"], "custom");
  }

  // ── Feed interactions ───────────────────────────────────────────────────

  async fn publish_one(state: &AppState<SqliteSessionBackend>) -> Value {
    request(
      state.clone(),
      "POST",
      "/draft",
      Some(json!({
        "first_name": "Ada",
        "last_name": "L",
        "birth_date": "2024-03-15"
      })),
    )
    .await;
    let (status, card) = request(
      state.clone(),
      "POST",
      "/cards",
      Some(json!({ "author": "GDG Team" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    card
  }

  #[tokio::test]
  async fn like_toggles_through_the_api() {
    let state = make_state().await;
    let card = publish_one(&state).await;
    let id = card["id"].as_str().unwrap();

    let (status, liked) = request(
      state.clone(),
      "POST",
      &format!("/cards/{id}/like"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["like_count"], 1);
    assert_eq!(liked["liked_by_viewer"], true);

    let (_, unliked) = request(
      state.clone(),
      "POST",
      &format!("/cards/{id}/like"),
      None,
    )
    .await;
    assert_eq!(unliked["like_count"], 0);
    assert_eq!(unliked["liked_by_viewer"], false);

    let (_, filtered) =
      request(state, "GET", "/cards?filter=liked", None).await;
    assert!(filtered.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn comment_returns_a_generated_template() {
    let state = make_state().await;
    let card = publish_one(&state).await;
    let id = card["id"].as_str().unwrap();

    let (status, body) = request(
      state,
      "POST",
      &format!("/cards/{id}/comments"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["card"]["comment_count"], 1);
    // Feed rng is scripted to index 0.
    assert_eq!(body["comment"], COMMENT_TEMPLATES[0]);
  }

  #[tokio::test]
  async fn share_falls_back_to_a_copy_link() {
    let state = make_state().await;
    let card = publish_one(&state).await;
    let id = card["id"].as_str().unwrap();

    let (status, body) = request(
      state,
      "POST",
      &format!("/cards/{id}/share"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "link_copied");
    assert_eq!(
      body["link"],
      format!("http://localhost:8245/cards/{id}")
    );
  }

  #[tokio::test]
  async fn interactions_on_an_unknown_card_return_404() {
    let state = make_state().await;
    let id = uuid::Uuid::new_v4();

    for path in [
      format!("/cards/{id}/like"),
      format!("/cards/{id}/favorite"),
      format!("/cards/{id}/comments"),
      format!("/cards/{id}/share"),
    ] {
      let (status, body) =
        request(state.clone(), "POST", &path, None).await;
      assert_eq!(status, StatusCode::NOT_FOUND, "path: {path}");
      assert!(body["error"].as_str().unwrap().contains("card not found"));
    }
  }

  #[tokio::test]
  async fn unknown_feed_filter_returns_400() {
    let state = make_state().await;
    let (status, _) =
      request(state.clone(), "GET", "/cards?filter=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
      state,
      "GET",
      "/cards?filter=liked&author=GDG%20Team",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn author_filter_returns_only_matching_cards() {
    let state = make_state().await;
    publish_one(&state).await;

    let (status, cards) =
      request(state.clone(), "GET", "/cards?author=GDG%20Team", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cards.as_array().unwrap().len(), 1);

    let (_, none) =
      request(state, "GET", "/cards?author=Nobody", None).await;
    assert!(none.as_array().unwrap().is_empty());
  }
}
