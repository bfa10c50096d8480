// self
use crate::{_prelude::*, http::Method, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("ledger_console.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
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
}

/// Logs a request that never obtained a response.
pub(crate) fn warn_network_failure(method: Method, path: &str, err: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%method, path, error = %err, "ledger backend unreachable");
	#[cfg(not(feature = "tracing"))]
	let _ = (method, path, err);
}

/// Logs a session teardown caused by failed recovery.
pub(crate) fn warn_session_terminated(path: &str, reason: &str) {
	#[cfg(feature = "tracing")]
	tracing::warn!(path, reason, "session terminated; re-authentication required");
	#[cfg(not(feature = "tracing"))]
	let _ = (path, reason);
}

/// Logs a failed best-effort remote logout.
pub(crate) fn warn_logout_failure(err: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(error = %err, "remote logout failed; local session cleared anyway");
	#[cfg(not(feature = "tracing"))]
	let _ = err;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Refresh, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn warn_helpers_accept_any_error() {
		let err = Error::RefreshFailed { reason: "refresh rejected".into() };

		warn_network_failure(Method::Get, "/customer/list", &err);
		warn_session_terminated("/customer/list", "refresh rejected");
		warn_logout_failure(&err);
	}
}
