//! Witness rules: fine-grained conditions attached to a signer with the
//! `WitnessRules` scope, each pairing an allow/deny action with a
//! condition tree evaluated during contract invocation.

pub use witness_action::*;
pub use witness_condition::*;
pub use witness_rule::*;

mod witness_action;
mod witness_condition;
mod witness_rule;
