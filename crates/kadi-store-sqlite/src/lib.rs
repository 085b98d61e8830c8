//! SQLite backend for the kadi session record.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. The whole store is a single
//! keyed record — the durable form of the authenticated member.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSessionBackend;
