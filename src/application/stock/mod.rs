mod errors;
mod stock_service;

pub use errors::{Result, StockApplicationError};
pub use stock_service::{change_stock, get_stock, save_stock};
