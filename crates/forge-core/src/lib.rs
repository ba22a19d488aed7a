//! Forge Core - Foundational types for Meshforge
//!
//! This crate provides the types every other Meshforge crate depends on:
//! - `ForgeError` and the `Result` alias
//! - `ContentHash` - SHA-256 hashing of generated artifacts

mod error;
mod hash;

pub use error::{ForgeError, Result};
pub use hash::ContentHash;
