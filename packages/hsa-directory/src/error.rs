use deadpool::managed::PoolError;
use ldap3::LdapError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The directory could not be reached in time.
	#[error("No directory connection: {message}")]
	NoConnection { message: String },
	#[error("Directory query failed: {message}")]
	Query { message: String },
	#[error("Invalid directory pool: {message}")]
	Pool { message: String },
}
impl From<LdapError> for Error {
	fn from(err: LdapError) -> Self {
		let message = err.to_string();

		match err {
			LdapError::Io { .. }
			| LdapError::Timeout { .. }
			| LdapError::EndOfStream
			| LdapError::OpSend { .. }
			| LdapError::ResultRecv { .. } => Self::NoConnection { message },
			LdapError::LdapResult { result } if is_unavailable(result.rc) =>
				Self::NoConnection { message },
			_ => Self::Query { message },
		}
	}
}
impl From<PoolError<LdapError>> for Error {
	fn from(err: PoolError<LdapError>) -> Self {
		match err {
			PoolError::Backend(inner) => inner.into(),
			PoolError::Timeout(kind) => Self::NoConnection {
				message: format!("Timed out waiting for a pooled connection ({kind:?})."),
			},
			PoolError::Closed => Self::NoConnection { message: "Connection pool is closed.".to_string() },
			other => Self::Pool { message: other.to_string() },
		}
	}
}

/// Result codes meaning the server cannot serve the request right now: timeLimitExceeded, busy,
/// unavailable and unwillingToPerform.
pub fn is_unavailable(rc: u32) -> bool {
	matches!(rc, 3 | 51 | 52 | 53)
}
