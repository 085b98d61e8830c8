//! Error types for `kadi-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// A required input was empty (or whitespace-only) at the point of use.
  #[error("{field} must not be empty")]
  EmptyField { field: &'static str },

  /// A draft was submitted with required fields still unset.
  #[error("missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("card not found: {0}")]
  CardNotFound(Uuid),

  /// The draft was already submitted; reset it to compose a new card.
  #[error("draft already submitted")]
  AlreadySubmitted,

  /// A newer authenticate attempt superseded this one before it completed.
  #[error("verification superseded by a newer attempt")]
  VerificationSuperseded,

  #[error("session persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
