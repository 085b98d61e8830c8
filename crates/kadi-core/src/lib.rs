//! Core types and trait definitions for the kadi birthday-card service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod card;
pub mod error;
pub mod member;
pub mod rng;
pub mod role;
pub mod session;
pub mod templates;

pub use error::{Error, Result};
