//! Service layer for playlister
//!
//! Owner-scoped playlist operations between a request handler and storage.
//! Authenticating the caller stays outside: every call takes the id of an
//! already verified user.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod playlist_service;

pub use error::{Result, ServiceError};
pub use playlist_service::PlaylistService;
