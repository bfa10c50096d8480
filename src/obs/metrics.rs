// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome},
};

const CALL_COUNTER: &str = "ledger_console_call_total";

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	emit(kind, outcome, None);
}

/// Records the terminal outcome of `result` for `kind`, labelling failures with their class.
pub(crate) fn record_result<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => emit(kind, CallOutcome::Success, None),
		Err(err) => emit(kind, CallOutcome::Failure, Some(error_class(err))),
	}
}

/// Stable label for the failure class of `err`.
pub fn error_class(err: &Error) -> &'static str {
	match err {
		Error::Config(_) => "config",
		Error::Network(_) => "network",
		Error::Decode(_) => "decode",
		Error::Server { .. } => "server",
		Error::AuthExpired { .. } => "auth_expired",
		Error::RefreshFailed { .. } => "refresh_failed",
		Error::InvalidCredential => "invalid_credential",
	}
}

fn emit(kind: CallKind, outcome: CallOutcome, class: Option<&'static str>) {
	#[cfg(feature = "metrics")]
	match class {
		Some(class) => metrics::counter!(
			CALL_COUNTER,
			"call" => kind.as_str(),
			"outcome" => outcome.as_str(),
			"error" => class
		)
		.increment(1),
		None => metrics::counter!(
			CALL_COUNTER,
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1),
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (CALL_COUNTER, kind, outcome, class);
	}
}
