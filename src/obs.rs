//! Optional observability helpers for option resolvers.
//!
//! # Feature Flags
//!
//! - `tracing`: each resolver call runs inside a `cf2_credentials.load_options` span carrying
//!   `method`, `stage`, and `workspace`, later annotated with `outcome` and the option count.
//! - `metrics`: [`LOAD_OPTIONS_TOTAL`] counts attempts and outcomes per `method`;
//!   [`LOAD_OPTIONS_DURATION`] records the latency of finished calls.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each resolver call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadOutcome {
	/// Entry to a resolver.
	Attempt,
	/// Options were returned.
	Success,
	/// Failure propagated back to the host.
	Failure,
}
impl LoadOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			LoadOutcome::Attempt => "attempt",
			LoadOutcome::Success => "success",
			LoadOutcome::Failure => "failure",
		}
	}
}
impl Display for LoadOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
