pub use nep6account::*;
pub use nep6contract::*;
pub use nep6wallet::*;

mod nep6account;
mod nep6contract;
mod nep6wallet;
