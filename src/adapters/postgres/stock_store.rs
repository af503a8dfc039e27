use crate::domain::{Stock, StockDeltaError};
use crate::ports::stock_store::{Result, StockStore as StockStoreTrait, StoreError};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::contains_nul;

/// PostgreSQLの行データをStockに変換する
fn map_row_to_stock(row: &PgRow) -> Stock {
    Stock {
        book_id: row.get("book_id"),
        total_stock: row.get("total_stock"),
        lent_stock: row.get("lent_stock"),
        available_stock: row.get("available_stock"),
    }
}

/// StockStoreのPostgreSQL実装
pub struct StockStore {
    pool: PgPool,
}

impl StockStore {
    /// PostgreSQLコネクションプールから新しいStockStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockStoreTrait for StockStore {
    async fn load_stock(&self, book_id: &str) -> Result<Stock> {
        if contains_nul(book_id) {
            return Err(StoreError::stock_not_found(book_id));
        }

        let row = sqlx::query(
            r#"
            SELECT book_id, total_stock, lent_stock, available_stock
            FROM stocks
            WHERE book_id = $1
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(map_row_to_stock)
            .ok_or_else(|| StoreError::stock_not_found(book_id))
    }

    async fn save_stock(&self, stock: Stock) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO stocks (book_id, total_stock, lent_stock, available_stock)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (book_id) DO NOTHING
            "#,
        )
        .bind(&stock.book_id)
        .bind(stock.total_stock)
        .bind(stock.lent_stock)
        .bind(stock.available_stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::duplicate_stock(stock.book_id));
        }
        Ok(())
    }

    /// 貸出可能数に増減を適用
    ///
    /// `SELECT ... FOR UPDATE`で行ロックを取得してから検証・更新するため、
    /// 同じ書籍への並行した増減はトランザクション単位で直列化される。
    async fn update_stock(&self, book_id: &str, delta: i64) -> Result<()> {
        if contains_nul(book_id) {
            return Err(StoreError::stock_not_found(book_id));
        }

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT book_id, total_stock, lent_stock, available_stock
            FROM stocks
            WHERE book_id = $1
            FOR UPDATE
            "#,
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let stock = row
            .as_ref()
            .map(map_row_to_stock)
            .ok_or_else(|| StoreError::stock_not_found(book_id))?;

        let next = stock.available_after(delta).map_err(|e| match e {
            StockDeltaError::Insufficient { available } => StoreError::InsufficientStock {
                book_id: book_id.to_string(),
                delta,
                available,
            },
            StockDeltaError::Overflow => StoreError::StockOverflow {
                book_id: book_id.to_string(),
                delta,
            },
        })?;

        sqlx::query("UPDATE stocks SET available_stock = $2 WHERE book_id = $1")
            .bind(book_id)
            .bind(next)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
