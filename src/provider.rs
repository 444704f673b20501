//! Provider lookup (registry) and dispatch preconditions (completeness).
//!
//! `registry` indexes the canonical locale's providers by ID for the authorization
//! dispatcher. `completeness` decides whether a provider carries everything needed to
//! build an authorization redirect.

/// Checks that a provider can be dispatched.
pub mod completeness;
/// Canonical provider index.
pub mod registry;

pub use completeness::*;
pub use registry::*;
