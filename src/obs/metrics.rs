// self
use crate::obs::{OpKind, OpOutcome};

/// Counts one load or dispatch step, labeled by `op` + `outcome`.
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("signin_broker_op_total", "op" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Publishes the shape of a freshly swapped-in generation.
///
/// Gauges: `signin_broker_generation`, `signin_broker_locales`, `signin_broker_providers`.
/// Unset `$ENV.` references add to `signin_broker_env_missing_total`.
pub fn record_published(generation: u64, locales: usize, providers: usize, missing_env: usize) {
	#[cfg(feature = "metrics")]
	{
		metrics::gauge!("signin_broker_generation").set(generation as f64);
		metrics::gauge!("signin_broker_locales").set(locales as f64);
		metrics::gauge!("signin_broker_providers").set(providers as f64);
		metrics::counter!("signin_broker_env_missing_total").increment(missing_env as u64);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (generation, locales, providers, missing_env);
	}
}

/// Counts an authorization request refused with the given HTTP status.
pub fn record_rejection(status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("signin_broker_authorize_rejected_total", "status" => status.to_string())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = status;
	}
}
