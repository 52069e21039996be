//! Public extension contracts for code that consumes the credential.
//!
//! Nodes that call the CF2 API with their own HTTP client attach authentication through
//! [`RequestSignerExt`] so every outbound request carries the same headers the descriptor
//! declares.

pub mod request_signer;

pub use request_signer::*;
