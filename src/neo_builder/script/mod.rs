pub use call_flags::*;
pub use interop_service::*;
pub use script_builder::*;

mod call_flags;
mod interop_service;
mod script_builder;
