pub use contract_parameters_context::*;
pub use invocation_script::*;
pub use signers::*;
pub use transaction::*;
pub use transaction_attribute::*;
pub use transaction_builder::*;
pub use transaction_error::*;
pub use verification_script::*;
pub use witness::*;
pub use witness_rule::*;
pub use witness_scope::*;

mod contract_parameters_context;
mod invocation_script;
mod signers;
mod transaction;
mod transaction_attribute;
mod transaction_builder;
mod transaction_error;
mod verification_script;
mod witness;
mod witness_rule;
mod witness_scope;
