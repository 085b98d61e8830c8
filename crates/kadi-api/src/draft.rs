//! Handlers for `/draft` and `/roles` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/draft` | The card under composition |
//! | `POST`   | `/draft` | Partial update; only fields present in the body are written |
//! | `DELETE` | `/draft` | Discard and start an empty draft |
//! | `POST`   | `/draft/role` | Body: [`RoleBody`]; `"custom"` switches to a free-text role |
//! | `POST`   | `/draft/suggest` | Body: [`SuggestBody`]; returns the generated message |
//! | `POST`   | `/draft/submit` | Validating snapshot for preview |
//! | `GET`    | `/roles` | The role catalog and the custom sentinel |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kadi_core::{
  card::DraftCard,
  role::{CUSTOM_ROLE, Role},
  session::SessionBackend,
};

use crate::{AppState, error::ApiError};

// ─── Update ──────────────────────────────────────────────────────────────────

/// Partial update body for `POST /draft`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct DraftUpdateBody {
  pub first_name:  Option<String>,
  pub last_name:   Option<String>,
  pub custom_role: Option<String>,
  pub birth_date:  Option<NaiveDate>,
  pub photo:       Option<String>,
  pub message:     Option<String>,
  pub keywords:    Option<String>,
}

/// `POST /draft`
pub async fn update<B>(
  State(state): State<AppState<B>>,
  Json(body): Json<DraftUpdateBody>,
) -> Result<Json<DraftCard>, ApiError>
where
  B: SessionBackend + 'static,
{
  let mut draft = state.draft.lock();
  if let Some(v) = body.first_name {
    draft.set_first_name(v)?;
  }
  if let Some(v) = body.last_name {
    draft.set_last_name(v)?;
  }
  if let Some(v) = body.custom_role {
    draft.set_custom_role(v)?;
  }
  if let Some(v) = body.birth_date {
    draft.set_birth_date(Some(v))?;
  }
  if let Some(v) = body.photo {
    draft.set_photo(Some(v))?;
  }
  if let Some(v) = body.message {
    draft.set_message(v)?;
  }
  if let Some(v) = body.keywords {
    draft.set_keywords(v)?;
  }
  Ok(Json(draft.card().clone()))
}

/// `GET /draft`
pub async fn current<B>(
  State(state): State<AppState<B>>,
) -> Json<DraftCard>
where
  B: SessionBackend + 'static,
{
  Json(state.draft.lock().card().clone())
}

/// `DELETE /draft`
pub async fn reset<B>(State(state): State<AppState<B>>) -> impl IntoResponse
where
  B: SessionBackend + 'static,
{
  state.draft.lock().reset();
  StatusCode::NO_CONTENT
}

// ─── Role selection ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoleBody {
  /// A catalog label, or the `"custom"` sentinel.
  pub role:        String,
  /// Free-text role; only meaningful alongside the sentinel.
  pub custom_role: Option<String>,
}

/// `POST /draft/role`
pub async fn select_role<B>(
  State(state): State<AppState<B>>,
  Json(body): Json<RoleBody>,
) -> Result<Json<DraftCard>, ApiError>
where
  B: SessionBackend + 'static,
{
  let mut draft = state.draft.lock();
  draft.select_role(&body.role)?;
  if let Some(custom) = body.custom_role {
    draft.set_custom_role(custom)?;
  }
  Ok(Json(draft.card().clone()))
}

// ─── Suggestion ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestBody {
  pub keywords: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
  pub message: String,
}

/// `POST /draft/suggest` — also stores the message on the draft.
pub async fn suggest<B>(
  State(state): State<AppState<B>>,
  Json(body): Json<SuggestBody>,
) -> Result<Json<SuggestResponse>, ApiError>
where
  B: SessionBackend + 'static,
{
  let message = state.draft.lock().suggest_message(&body.keywords)?;
  Ok(Json(SuggestResponse { message }))
}

// ─── Submit ──────────────────────────────────────────────────────────────────

/// `POST /draft/submit` — validating snapshot; the draft itself stays put.
pub async fn submit<B>(
  State(state): State<AppState<B>>,
) -> Result<Json<DraftCard>, ApiError>
where
  B: SessionBackend + 'static,
{
  Ok(Json(state.draft.lock().submit()?))
}

// ─── Roles ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RoleCatalog {
  pub roles:           Vec<String>,
  pub custom_sentinel: &'static str,
}

/// `GET /roles`
pub async fn roles() -> Json<RoleCatalog> {
  Json(RoleCatalog {
    roles:           Role::labels(),
    custom_sentinel: CUSTOM_ROLE,
  })
}
