pub use application_log::*;
pub use neo_block::*;
pub use neo_version::*;
pub use node_info::*;
pub use states::*;
pub use token_tracker::*;
pub use transaction_result::*;

mod application_log;
mod neo_block;
mod neo_version;
mod node_info;
mod states;
mod token_tracker;
mod transaction_result;
