//! Request authentication contracts that attach the session credential to outgoing requests.

// self
use crate::{auth::Credential, http::RequestDescriptor};

/// Header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Describes how to attach the current [`Credential`] to an outbound request.
///
/// Implementations are pure transforms: they never fail and never perform I/O.
pub trait RequestAuthenticator
where
	Self: Send + Sync,
{
	/// Returns `request` augmented with `credential`, or unchanged when there is none.
	fn authenticate(
		&self,
		request: RequestDescriptor,
		credential: Option<&Credential>,
	) -> RequestDescriptor;
}

/// Default authenticator that sets `Authorization: Bearer <token>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerAuthenticator;
impl RequestAuthenticator for BearerAuthenticator {
	fn authenticate(
		&self,
		request: RequestDescriptor,
		credential: Option<&Credential>,
	) -> RequestDescriptor {
		match credential {
			Some(credential) => request.with_header(AUTHORIZATION_HEADER, credential.bearer()),
			None => request,
		}
	}
}
