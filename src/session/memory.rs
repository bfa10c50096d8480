//! Thread-safe in-memory [`SessionStore`] implementation.

// self
use crate::{_prelude::*, auth::Credential, session::SessionStore};

/// Ephemeral session store that keeps the credential in-process only.
///
/// Clones share the same slot, so every handle observes the same session.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(Arc<RwLock<Option<Credential>>>);
impl MemorySessionStore {
	/// Creates a store already holding `token`, ignoring blank values.
	pub fn with_token(token: &str) -> Self {
		let store = Self::default();

		store.set(token);

		store
	}
}
impl SessionStore for MemorySessionStore {
	fn get(&self) -> Option<Credential> {
		self.0.read().clone()
	}

	fn store(&self, credential: Credential) {
		*self.0.write() = Some(credential);
	}

	fn clear(&self) {
		self.0.write().take();
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn token(store: &MemorySessionStore) -> Option<String> {
		store.get().map(|credential| credential.expose().to_owned())
	}

	#[test]
	fn set_replaces_and_empty_set_keeps_existing() {
		let store = MemorySessionStore::default();

		assert_eq!(token(&store), None);

		store.set("T1");
		store.set("T2");

		assert_eq!(token(&store), Some("T2".into()));

		store.set("");

		assert_eq!(token(&store), Some("T2".into()));
	}

	#[test]
	fn clear_is_idempotent() {
		let store = MemorySessionStore::with_token("T1");

		store.clear();
		store.clear();

		assert_eq!(token(&store), None);
		assert!(!store.is_authenticated());
	}

	#[test]
	fn clones_share_the_session() {
		let store = MemorySessionStore::default();
		let handle = store.clone();

		handle.set("shared");

		assert_eq!(token(&store), Some("shared".into()));
	}
}
