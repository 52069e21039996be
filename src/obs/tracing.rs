// self
use crate::{_prelude::*, auth::WorkspaceSubdomain, obs::LoadOutcome, resolver::LoadOptionsMethod};

/// Future returned by [`LoadSpan::instrument`]; the bare future when tracing is disabled.
#[cfg(feature = "tracing")]
pub type InstrumentedLoad<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`LoadSpan::instrument`]; the bare future when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedLoad<F> = F;

/// Span covering one resolver call.
///
/// Carries `method`, `stage`, and `workspace` from creation; `outcome` and `options` are filled
/// in by [`LoadSpan::finish`]. The API key is never attached.
#[derive(Clone, Debug)]
pub struct LoadSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl LoadSpan {
	/// Opens a span for `method` against `workspace`.
	pub fn new(
		method: LoadOptionsMethod,
		stage: &'static str,
		workspace: &WorkspaceSubdomain,
	) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"cf2_credentials.load_options",
				method = method.as_str(),
				stage,
				workspace = %workspace,
				outcome = tracing::field::Empty,
				options = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, stage, workspace);

			Self {}
		}
	}

	/// Drives `fut` inside the span without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedLoad<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records how the call ended and, on success, how many options it produced.
	pub fn finish(&self, outcome: LoadOutcome, options: Option<usize>) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome.as_str());

			if let Some(count) = options {
				self.span.record("options", count);
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (outcome, options);
		}
	}
}
