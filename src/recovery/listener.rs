//! Re-authentication signalling.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::_prelude::*;

/// Receives the signal that the application must navigate to re-authentication.
///
/// Invoked after the session has already been cleared, once per terminated request.
pub trait ReauthListener
where
	Self: Send + Sync,
{
	/// Called with the configured login route.
	fn reauthentication_required(&self, login_route: &str);
}

/// Listener that records the most recent re-authentication signal for polling callers.
#[derive(Debug, Default)]
pub struct ReauthFlag {
	required: AtomicBool,
	route: Mutex<Option<String>>,
}
impl ReauthFlag {
	/// Returns `true` once a session termination has been signalled and not yet acknowledged.
	pub fn is_required(&self) -> bool {
		self.required.load(Ordering::Acquire)
	}

	/// Route recorded by the most recent signal.
	pub fn route(&self) -> Option<String> {
		self.route.lock().clone()
	}

	/// Clears the flag, returning the route that was pending, if any.
	pub fn acknowledge(&self) -> Option<String> {
		self.required.store(false, Ordering::Release);

		self.route.lock().take()
	}
}
impl ReauthListener for ReauthFlag {
	fn reauthentication_required(&self, login_route: &str) {
		*self.route.lock() = Some(login_route.to_owned());

		self.required.store(true, Ordering::Release);
	}
}
