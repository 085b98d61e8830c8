//! Handlers for `/session` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/session` | Body: [`AuthenticateBody`]; simulates verification latency; returns 201 + [`Member`] |
//! | `GET`  | `/session` | The member authenticated or restored this process |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use serde::Deserialize;

use kadi_core::{member::Member, session::SessionBackend};

use crate::{AppState, error::ApiError};

/// JSON body accepted by `POST /session`.
#[derive(Debug, Deserialize)]
pub struct AuthenticateBody {
  pub contact_id:   String,
  pub display_name: String,
  /// Opaque binary-as-text blob, passed through untouched.
  pub photo:        Option<String>,
}

/// `POST /session` — returns 201 + the verified [`Member`].
pub async fn create<B>(
  State(state): State<AppState<B>>,
  Json(body): Json<AuthenticateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  B: SessionBackend + 'static,
{
  let member = state
    .session
    .authenticate(&body.contact_id, &body.display_name, body.photo)
    .await?;
  Ok((StatusCode::CREATED, Json(member)))
}

/// `GET /session`
pub async fn current<B>(
  State(state): State<AppState<B>>,
) -> Result<Json<Member>, ApiError>
where
  B: SessionBackend + 'static,
{
  state
    .session
    .current()
    .map(Json)
    .ok_or_else(|| ApiError::NotFound("no active session".to_owned()))
}
