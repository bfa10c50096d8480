//! Session credential storage contracts and the built-in in-memory store.

pub mod memory;

pub use memory::MemorySessionStore;

// self
use crate::auth::Credential;

/// Holds at most one bearer [`Credential`] for a single browsing context.
///
/// Stores are scoped to one session: nothing is written to durable storage, and dropping the
/// store ends the session. Implementations are injected into the client so tests can substitute
/// their own doubles.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns the current credential, if any.
	fn get(&self) -> Option<Credential>;

	/// Replaces the current credential.
	fn store(&self, credential: Credential);

	/// Removes the current credential. Calling this on an empty store is a no-op.
	fn clear(&self);

	/// Stores `token` unless it is empty, in which case any existing credential is kept.
	fn set(&self, token: &str) {
		if let Some(credential) = Credential::parse(token) {
			self.store(credential);
		}
	}

	/// Returns `true` when a credential is currently held.
	fn is_authenticated(&self) -> bool {
		self.get().is_some()
	}
}
