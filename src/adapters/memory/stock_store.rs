use crate::domain::{Stock, StockDeltaError};
use crate::ports::stock_store::{Result, StockStore as StockStoreTrait, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of StockStore
///
/// Maps book ID to its stock record behind a single reader/writer lock.
/// `update_stock` reads, checks and writes under one write-lock acquisition.
pub struct StockStore {
    stocks: RwLock<HashMap<String, Stock>>,
}

impl StockStore {
    pub fn new() -> Self {
        Self {
            stocks: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for StockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StockStoreTrait for StockStore {
    async fn load_stock(&self, book_id: &str) -> Result<Stock> {
        let stocks = self.stocks.read().await;
        stocks
            .get(book_id)
            .cloned()
            .ok_or_else(|| StoreError::stock_not_found(book_id))
    }

    async fn save_stock(&self, stock: Stock) -> Result<()> {
        let mut stocks = self.stocks.write().await;
        if stocks.contains_key(&stock.book_id) {
            return Err(StoreError::duplicate_stock(stock.book_id));
        }

        stocks.insert(stock.book_id.clone(), stock);
        Ok(())
    }

    async fn update_stock(&self, book_id: &str, delta: i64) -> Result<()> {
        let mut stocks = self.stocks.write().await;
        let stock = stocks
            .get_mut(book_id)
            .ok_or_else(|| StoreError::stock_not_found(book_id))?;

        match stock.available_after(delta) {
            Ok(next) => {
                stock.available_stock = next;
                Ok(())
            }
            Err(StockDeltaError::Insufficient { available }) => Err(StoreError::InsufficientStock {
                book_id: book_id.to_string(),
                delta,
                available,
            }),
            Err(StockDeltaError::Overflow) => Err(StoreError::StockOverflow {
                book_id: book_id.to_string(),
                delta,
            }),
        }
    }
}
