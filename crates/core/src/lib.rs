//! Core types for playlister
//!
//! Entity model, partial-update inputs and startup configuration shared by
//! the storage backends, the service layer and the binary.

mod config;
pub mod constants;
mod env_config;
mod playlist;
mod time;
mod user;

pub use config::*;
pub use constants::*;
pub use env_config::*;
pub use playlist::*;
pub use time::now;
pub use user::*;
