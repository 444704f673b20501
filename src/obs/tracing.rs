// self
use crate::{_prelude::*, obs::OpKind};

/// A span builder used by loads and dispatch.
#[derive(Clone, Debug)]
pub struct OpSpan {
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(kind: OpKind, stage: &'static str) -> Self {
		let span = tracing::info_span!("signin_broker.op", op = kind.as_str(), stage);

		Self { span }
	}

	/// Enters the span; it stays entered until the guard drops.
	pub fn entered(self) -> OpSpanGuard {
		OpSpanGuard { _guard: self.span.entered() }
	}
}

/// RAII guard returned by [`OpSpan::entered`].
pub struct OpSpanGuard {
	_guard: tracing::span::EnteredSpan,
}
impl Debug for OpSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OpSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn span_guard_without_subscriber() {
		let _guard = OpSpan::new(OpKind::Authorize, "test").entered();
		// No subscriber installed.
	}
}
