use crate::domain::{Stock, StockDeltaError};

use super::super::ServiceDependencies;
use super::errors::{Result, StockApplicationError};

/// 書籍IDで在庫を取得する
#[tracing::instrument(skip(deps))]
pub async fn get_stock(deps: &ServiceDependencies, book_id: &str) -> Result<Stock> {
    deps.stock_store
        .load_stock(book_id)
        .await
        .map_err(|source| StockApplicationError::LoadStockFailed {
            book_id: book_id.to_string(),
            source,
        })
}

/// 在庫レコードを新規登録する
///
/// ビジネスルール：
/// - 書籍IDが空でなく、NUL文字を含まないこと
/// - 総数・貸出数・貸出可能数がすべて0以上であること
/// - 同じ書籍IDの在庫が存在しないこと
///
/// 書籍の存在は確認しない（在庫のライフサイクルは書籍から独立）。
#[tracing::instrument(skip(deps, stock), fields(book_id = %stock.book_id))]
pub async fn save_stock(deps: &ServiceDependencies, stock: Stock) -> Result<()> {
    if stock.book_id.is_empty() {
        return Err(StockApplicationError::InvalidStock("book id must not be empty".to_string()));
    }
    if stock.book_id.contains('\0') {
        return Err(StockApplicationError::InvalidStock(
            "book id must not contain NUL characters".to_string(),
        ));
    }
    if !stock.has_valid_quantities() {
        return Err(StockApplicationError::InvalidStock(
            "stock quantities must not be negative".to_string(),
        ));
    }

    let book_id = stock.book_id.clone();
    deps.stock_store
        .save_stock(stock)
        .await
        .map_err(|source| StockApplicationError::SaveStockFailed { book_id, source })?;

    tracing::debug!("stock saved");
    Ok(())
}

/// 貸出可能数を増減する
///
/// ビジネスルール: 増減後の貸出可能数が負になってはならない。
///
/// 1. 現在の在庫を読み込む
/// 2. `available + delta >= 0` を事前チェックし、違反なら書き込まずに拒否する
/// 3. ストアに増減を依頼する
///
/// # 一貫性保証
///
/// 手順1と手順3は別々のクリティカルセクションで、その間に他の呼び出しが割り込みうる。
/// 事前チェックは早期の分かりやすい拒否のためのもので、不変条件の保証はストアの
/// アトミックな更新が担う。競合に負けた場合は`UpdateStockFailed`
/// （種別`InsufficientStock`）が返る。
#[tracing::instrument(skip(deps))]
pub async fn change_stock(deps: &ServiceDependencies, book_id: &str, delta: i64) -> Result<()> {
    let stock = get_stock(deps, book_id).await?;

    match stock.available_after(delta) {
        Ok(_) => {}
        Err(StockDeltaError::Insufficient { available }) => {
            tracing::warn!(available, "rejected stock delta");
            return Err(StockApplicationError::InsufficientStock {
                book_id: book_id.to_string(),
                delta,
                available,
            });
        }
        Err(StockDeltaError::Overflow) => {
            return Err(StockApplicationError::DeltaOverflow {
                book_id: book_id.to_string(),
                delta,
            });
        }
    }

    deps.stock_store
        .update_stock(book_id, delta)
        .await
        .map_err(|source| StockApplicationError::UpdateStockFailed {
            book_id: book_id.to_string(),
            delta,
            source,
        })?;

    tracing::debug!("stock changed");
    Ok(())
}
