//! Domain models shared between the server and its clients

pub mod dining_table;
pub mod menu_item;
pub mod modifier;
pub mod qr;

pub use dining_table::*;
pub use menu_item::*;
pub use modifier::*;
pub use qr::*;
