//! Deterministic test double for the transport connection
//!
//! [`MockConnection`] replays a pre-declared, ordered list of expected
//! request/response exchanges and asserts an exact match on every observed
//! request. Contract violations are surfaced as panics (test assertion
//! failures), deliberately distinct from the production error taxonomy.

mod calls;
mod mock;

pub use calls::ApiCall;
pub use mock::MockConnection;
