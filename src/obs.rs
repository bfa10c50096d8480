//! Optional observability helpers for backend calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `ledger_console.call` with the `call` (kind)
//!   and `stage` (call site) fields, plus warn-level events for network failures and session
//!   terminations.
//! - Enable `metrics` to increment the `ledger_console_call_total` counter for every
//!   attempt/success/failure, labeled by `call` and `outcome`. Terminal failures also carry an
//!   `error` label naming the failure class.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Collaborator-initiated request through the verb surface.
	Request,
	/// Cookie-authenticated bearer renewal.
	Refresh,
	/// Credential exchange.
	Login,
	/// Account registration.
	Register,
	/// Remote session teardown.
	Logout,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Request => "request",
			CallKind::Refresh => "refresh",
			CallKind::Login => "login",
			CallKind::Register => "register",
			CallKind::Logout => "logout",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
