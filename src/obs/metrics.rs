// std
use std::time::Duration as StdDuration;
// self
use crate::{obs::LoadOutcome, resolver::LoadOptionsMethod};

/// Counter incremented once per attempt and once per terminal outcome.
pub const LOAD_OPTIONS_TOTAL: &str = "cf2_credentials_load_options_total";
/// Histogram of wall-clock seconds spent in a resolver call, including decode.
pub const LOAD_OPTIONS_DURATION: &str = "cf2_credentials_load_options_duration_seconds";

/// Bumps [`LOAD_OPTIONS_TOTAL`] for `method` and `outcome` (no-op without `metrics`).
pub fn record_load_outcome(method: LoadOptionsMethod, outcome: LoadOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			LOAD_OPTIONS_TOTAL,
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}

/// Records a finished call's latency in [`LOAD_OPTIONS_DURATION`] (no-op without `metrics`).
///
/// Only terminal outcomes are meaningful here; attempts are ignored.
pub fn record_load_latency(method: LoadOptionsMethod, outcome: LoadOutcome, elapsed: StdDuration) {
	if outcome == LoadOutcome::Attempt {
		return;
	}

	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(
			LOAD_OPTIONS_DURATION,
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.record(elapsed.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, elapsed);
	}
}
