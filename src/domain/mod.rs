pub mod account;
pub mod menu_item;
pub mod order;

pub use account::*;
pub use menu_item::*;
pub use order::*;
