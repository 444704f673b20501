//! Observability for configuration loads and authorization dispatch.
//!
//! Both operations run inside a `signin_broker.op` span (`op`, `stage` fields) and report
//! attempt/outcome pairs through [`finish`]. Loads additionally publish generation gauges;
//! refused authorizations are counted by HTTP status.
//!
//! # Feature Flags
//!
//! - `metrics`: emits `signin_broker_op_total`, `signin_broker_generation`,
//!   `signin_broker_locales`, `signin_broker_providers`, `signin_broker_env_missing_total`
//!   and `signin_broker_authorize_rejected_total` through the global recorder.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Instrumented operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// [`crate::store::ConfigStore::load`].
	Load,
	/// [`crate::dispatch::AuthorizationDispatcher::authorize`].
	Authorize,
}
impl OpKind {
	/// Label used for the `op` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Load => "load",
			Self::Authorize => "authorize",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Phase of an instrumented operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Operation entered.
	Attempt,
	/// Operation returned `Ok`.
	Success,
	/// Operation returned `Err`.
	Failure,
}
impl OpOutcome {
	/// Terminal outcome of `result`.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => Self::Success,
			Err(_) => Self::Failure,
		}
	}

	/// Label used for the `outcome` metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of `result` and returns it unchanged.
pub fn finish<T, E>(kind: OpKind, result: Result<T, E>) -> Result<T, E> {
	record_op_outcome(kind, OpOutcome::of(&result));

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn outcome_follows_result() {
		assert_eq!(OpOutcome::of(&Ok::<_, ()>(1)), OpOutcome::Success);
		assert_eq!(OpOutcome::of(&Err::<(), _>("boom")), OpOutcome::Failure);
		assert_eq!(finish(OpKind::Load, Err::<(), _>(7)), Err(7));
		assert_eq!(OpKind::Authorize.to_string(), "authorize");
	}
}
