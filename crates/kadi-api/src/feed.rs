//! Handlers for `/cards` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/cards` | Feed order, newest first; optional `?filter=liked\|favorited` or `?author=` |
//! | `POST` | `/cards` | Body: [`PublishBody`]; submits the draft, publishes it, resets the draft |
//! | `POST` | `/cards/{id}/like` | Toggle the viewer's like |
//! | `POST` | `/cards/{id}/favorite` | Toggle the viewer's favorite |
//! | `POST` | `/cards/{id}/comments` | Increment the count; returns a generated comment |
//! | `POST` | `/cards/{id}/share` | Native share or copy-link fallback |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kadi_core::{
  card::{FeedCard, ShareOutcome},
  session::SessionBackend,
};

use crate::{AppState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `liked` or `favorited`; restricts to the viewer's flagged cards.
  pub filter: Option<String>,
  /// Restrict to cards published under this attribution label.
  pub author: Option<String>,
}

/// `GET /cards[?filter=liked|favorited][?author=...]`
pub async fn list<B>(
  State(state): State<AppState<B>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<FeedCard>>, ApiError>
where
  B: SessionBackend + 'static,
{
  let cards = match (params.filter.as_deref(), params.author.as_deref()) {
    (None, None) => state.feed.cards(),
    (None, Some(author)) => state.feed.by_author(author),
    (Some("liked"), None) => state.feed.liked(),
    (Some("favorited"), None) => state.feed.favorited(),
    (Some(other), None) => {
      return Err(ApiError::BadRequest(format!(
        "unknown filter: {other:?} (expected \"liked\" or \"favorited\")"
      )));
    }
    (Some(_), Some(_)) => {
      return Err(ApiError::BadRequest(
        "specify either filter or author, not both".to_owned(),
      ));
    }
  };
  Ok(Json(cards))
}

// ─── Publish ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PublishBody {
  pub author: String,
}

/// `POST /cards` — submits the current draft, publishes the snapshot, and
/// resets the draft for the next composition. Returns 201 + the new card.
pub async fn publish<B>(
  State(state): State<AppState<B>>,
  Json(body): Json<PublishBody>,
) -> Result<impl IntoResponse, ApiError>
where
  B: SessionBackend + 'static,
{
  let author = body.author.trim();
  if author.is_empty() {
    return Err(ApiError::BadRequest("author must not be empty".to_owned()));
  }

  let snapshot = state.draft.lock().submit()?;
  let card = state.feed.publish(&snapshot, author)?;
  state.draft.lock().reset();
  Ok((StatusCode::CREATED, Json(card)))
}

// ─── Interactions ────────────────────────────────────────────────────────────

/// `POST /cards/{id}/like`
pub async fn like<B>(
  State(state): State<AppState<B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<FeedCard>, ApiError>
where
  B: SessionBackend + 'static,
{
  Ok(Json(state.feed.toggle_like(id)?))
}

/// `POST /cards/{id}/favorite`
pub async fn favorite<B>(
  State(state): State<AppState<B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<FeedCard>, ApiError>
where
  B: SessionBackend + 'static,
{
  Ok(Json(state.feed.toggle_favorite(id)?))
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
  pub card:    FeedCard,
  /// Advisory display text; only the count is stored.
  pub comment: String,
}

/// `POST /cards/{id}/comments`
pub async fn comment<B>(
  State(state): State<AppState<B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CommentResponse>, ApiError>
where
  B: SessionBackend + 'static,
{
  let (card, comment) = state.feed.add_comment(id)?;
  Ok(Json(CommentResponse { card, comment }))
}

/// `POST /cards/{id}/share`
pub async fn share<B>(
  State(state): State<AppState<B>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ShareOutcome>, ApiError>
where
  B: SessionBackend + 'static,
{
  Ok(Json(state.feed.share(id)?))
}
