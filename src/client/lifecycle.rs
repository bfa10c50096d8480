//! Session lifecycle operations consumed by the authentication flow.
//!
//! These calls bypass recovery: a 401 from the login endpoint means the credentials were wrong,
//! not that a session needs renewal, so it surfaces as [`Error::Server`].

// self
use crate::{
	_prelude::*,
	auth::{AccessTokenResponse, Credential},
	client::{HttpClient, successful},
	http::{ApiTransport, RequestDescriptor},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::SessionStore,
};

/// Clears the session when dropped, so logout cleanup runs on every exit path.
struct ClearOnDrop<'a>(&'a dyn SessionStore);
impl Drop for ClearOnDrop<'_> {
	fn drop(&mut self) {
		self.0.clear();
	}
}

impl<T> HttpClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Exchanges `identifier` + `secret` for a bearer credential and stores it.
	pub async fn login(&self, identifier: &str, secret: &str) -> Result<Credential> {
		const KIND: CallKind = CallKind::Login;

		let span = CallSpan::new(KIND, "login");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = RequestDescriptor::post(self.config.endpoints.login.as_str())
					.with_form([("email", identifier), ("password", secret)]);
				let response = successful(self.recovery.dispatch(&request).await?)?;
				let credential = response
					.json::<AccessTokenResponse>()?
					.into_credential()
					.ok_or(Error::InvalidCredential)?;

				self.session().store(credential.clone());

				Ok(credential)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Registers a new console user. Has no effect on the session.
	pub async fn register<B, R>(&self, payload: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Register;

		let span = CallSpan::new(KIND, "register");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request =
					RequestDescriptor::post(self.config.endpoints.register.as_str()).with_json(payload)?;

				Ok(successful(self.recovery.dispatch(&request).await?)?.json()?)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Ends the session.
	///
	/// The remote call is best-effort; the local session is cleared regardless of its outcome,
	/// including when this future is dropped mid-flight. A remote failure is logged and returned
	/// for callers that want to report it, but the user is signed out either way.
	pub async fn logout(&self) -> Result<()> {
		const KIND: CallKind = CallKind::Logout;

		let span = CallSpan::new(KIND, "logout");
		let _cleanup = ClearOnDrop(self.session().as_ref());

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = RequestDescriptor::post(self.config.endpoints.logout.as_str());

				successful(self.recovery.dispatch(&request).await?).map(|_| ())
			})
			.await;

		if let Err(err) = &result {
			obs::warn_logout_failure(err);
		}

		obs::record_result(KIND, &result);

		result
	}
}
