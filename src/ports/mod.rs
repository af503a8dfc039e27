pub mod book_store;
pub mod errors;
pub mod permission_gate;
pub mod stock_store;

pub use book_store::BookStore;
pub use errors::{BOOK_ENTITY, STOCK_ENTITY, StoreError};
pub use permission_gate::{PermissionGate, PermissionGateError};
pub use stock_store::StockStore;
