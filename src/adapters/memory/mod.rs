pub mod book_store;
pub mod stock_store;

pub use book_store::BookStore as MemoryBookStore;
pub use stock_store::StockStore as MemoryStockStore;
