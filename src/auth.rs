//! Session credentials and idempotency keys.

pub mod credential;
pub mod idempotency;

pub use credential::*;
pub use idempotency::*;
