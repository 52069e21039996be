//! Credential identifiers and secrets.

pub mod id;
pub mod secret;

pub use id::*;
pub use secret::*;
