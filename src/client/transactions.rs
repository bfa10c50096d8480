//! Typed transaction submissions (deposit, withdrawal, transfer).
//!
//! Each submission generates exactly one [`IdempotencyKey`] up front. The key rides on the request
//! descriptor, so a transparent refresh-and-retry resends the very same key and the backend can
//! deduplicate the delivery.

// self
use crate::{
	_prelude::*,
	auth::IdempotencyKey,
	client::HttpClient,
	error::ConfigError,
	http::{ApiTransport, RequestDescriptor},
};

/// Positive decimal amount rendered verbatim into the transaction path (e.g. `10.00`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amount(String);
impl Amount {
	/// Parses a plain decimal string with at most one `.` followed by at least one digit, and a
	/// non-zero value.
	pub fn parse(value: &str) -> Result<Self, ConfigError> {
		let value = value.trim();
		let invalid = || ConfigError::InvalidAmount { value: value.to_owned() };
		let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
		let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

		if whole.is_empty() && fraction.is_empty() {
			return Err(invalid());
		}
		if value.ends_with('.') {
			return Err(invalid());
		}
		if !digits_only(whole) || !digits_only(fraction) {
			return Err(invalid());
		}
		if !value.bytes().any(|b| matches!(b, b'1'..=b'9')) {
			return Err(invalid());
		}

		Ok(Self(value.to_owned()))
	}

	/// Amount as sent on the wire.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for Amount {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Amount {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// Kind of money movement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
	/// Credit `account`.
	Deposit {
		/// Target account identifier.
		account: String,
		/// Amount to credit.
		amount: Amount,
	},
	/// Debit `account`.
	Withdraw {
		/// Source account identifier.
		account: String,
		/// Amount to debit.
		amount: Amount,
	},
	/// Move funds between accounts.
	Transfer {
		/// Source account identifier.
		from: String,
		/// Destination account identifier.
		to: String,
		/// Amount to move.
		amount: Amount,
	},
}
impl Transaction {
	/// Builds the submission path, appending a percent-encoded `reference` when present.
	pub fn path(&self, reference: Option<&str>) -> Result<String, ConfigError> {
		let mut path = match self {
			Self::Deposit { account, amount } =>
				format!("/transactions/deposit/{}/{amount}", segment(account)?),
			Self::Withdraw { account, amount } =>
				format!("/transactions/withdraw/{}/{amount}", segment(account)?),
			Self::Transfer { from, to, amount } =>
				format!("/transactions/transfer/{}/{}/{amount}", segment(from)?, segment(to)?),
		};

		if let Some(reference) = reference.filter(|value| !value.is_empty()) {
			path.push_str("?reference=");
			path.push_str(&urlencoding::encode(reference));
		}

		Ok(path)
	}
}

/// Backend acknowledgement of a submitted transaction.
#[derive(Clone, Debug)]
pub struct TransactionReceipt {
	/// Key the submission was sent (and possibly retried) with.
	pub idempotency_key: IdempotencyKey,
	/// Backend acknowledgement; a plain-text body is kept as [`JsonValue::String`].
	pub payload: JsonValue,
}

impl<T> HttpClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Submits `transaction` under a freshly generated idempotency key.
	pub async fn submit(
		&self,
		transaction: &Transaction,
		reference: Option<&str>,
	) -> Result<TransactionReceipt> {
		let idempotency_key = self.idempotency_key();
		let request = RequestDescriptor::post(transaction.path(reference)?)
			.with_json_value(JsonValue::Object(Default::default()))
			.with_idempotency_key(&idempotency_key);
		let payload = self.execute(request).await?.payload();

		Ok(TransactionReceipt { idempotency_key, payload })
	}

	/// Credits `amount` to `account`.
	pub async fn deposit(
		&self,
		account: impl Display,
		amount: Amount,
		reference: Option<&str>,
	) -> Result<TransactionReceipt> {
		self.submit(&Transaction::Deposit { account: account.to_string(), amount }, reference).await
	}

	/// Debits `amount` from `account`.
	pub async fn withdraw(
		&self,
		account: impl Display,
		amount: Amount,
		reference: Option<&str>,
	) -> Result<TransactionReceipt> {
		self.submit(&Transaction::Withdraw { account: account.to_string(), amount }, reference)
			.await
	}

	/// Moves `amount` from `from` to `to`.
	pub async fn transfer(
		&self,
		from: impl Display,
		to: impl Display,
		amount: Amount,
		reference: Option<&str>,
	) -> Result<TransactionReceipt> {
		let transaction =
			Transaction::Transfer { from: from.to_string(), to: to.to_string(), amount };

		self.submit(&transaction, reference).await
	}
}

fn segment(value: &str) -> Result<&str, ConfigError> {
	if !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
	{
		Ok(value)
	} else {
		Err(ConfigError::InvalidPathSegment { value: value.to_owned() })
	}
}
