//! Idempotency keys attached to user-initiated mutating submissions.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
// self
use crate::_prelude::*;

/// Header carrying the submission's idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

const KEY_PREFIX: &str = "idemp";
const RANDOM_BYTES: usize = 16;

/// Opaque key identifying one user-initiated submission.
///
/// The key is generated once per submission and travels with the request descriptor, so any
/// transparent retry of the same submission carries the identical value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey(String);
impl IdempotencyKey {
	/// Wraps an externally supplied key, rejecting blank values.
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let value = value.into();

		if value.trim().is_empty() { None } else { Some(Self(value)) }
	}

	/// Returns the key as sent on the wire.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for IdempotencyKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for IdempotencyKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "IdempotencyKey({})", self.0)
	}
}
impl Display for IdempotencyKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Source of fresh idempotency keys, one per user-initiated submission.
pub trait IdempotencyKeyGenerator
where
	Self: Send + Sync,
{
	/// Produces a key that has never been handed out before.
	fn generate(&self) -> IdempotencyKey;
}

/// Default generator combining a millisecond timestamp with 128 random bits.
///
/// Keys look like `idemp-1760784000123-<22 url-safe chars>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomKeyGenerator;
impl IdempotencyKeyGenerator for RandomKeyGenerator {
	fn generate(&self) -> IdempotencyKey {
		let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
		let mut entropy = [0_u8; RANDOM_BYTES];

		rand::rng().fill(&mut entropy[..]);

		IdempotencyKey(format!("{KEY_PREFIX}-{millis}-{}", URL_SAFE_NO_PAD.encode(entropy)))
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn generated_keys_are_non_empty_and_distinct() {
		let generator = RandomKeyGenerator;
		let keys = (0..100).map(|_| generator.generate()).collect::<Vec<_>>();

		assert!(keys.iter().all(|key| !key.as_str().is_empty()));
		assert_eq!(keys.iter().collect::<HashSet<_>>().len(), keys.len());
	}

	#[test]
	fn generated_keys_carry_timestamp_and_entropy() {
		let key = RandomKeyGenerator.generate();
		let mut parts = key.as_str().splitn(3, '-');

		assert_eq!(parts.next(), Some(KEY_PREFIX));
		assert!(
			parts
				.next()
				.and_then(|millis| millis.parse::<i128>().ok())
				.is_some_and(|millis| millis > 0)
		);
		assert_eq!(parts.next().map(str::len), Some(22));
	}

	#[test]
	fn blank_external_keys_are_rejected() {
		assert!(IdempotencyKey::new(" ").is_none());
		assert_eq!(IdempotencyKey::new("abc").map(|key| key.to_string()), Some("abc".into()));
	}
}
