pub mod api_client;
pub mod storage;
pub mod cart_persistence;

pub use api_client::*;
pub use storage::*;
pub use cart_persistence::*;
