use crate::domain::Stock;
use async_trait::async_trait;

pub use super::errors::{Result, StoreError};

/// 在庫ストアポート
///
/// 書籍IDをキーとした在庫レコードの永続化を抽象化する。
/// 書籍ストアとの参照整合性は検証しない。
#[async_trait]
pub trait StockStore: Send + Sync {
    /// 書籍IDで在庫を取得する
    ///
    /// 存在しない場合は`NotFound`。
    async fn load_stock(&self, book_id: &str) -> Result<Stock>;

    /// 在庫レコードを新規保存する
    ///
    /// 同じ書籍IDのレコードが既に存在する場合は`DuplicateId`。
    async fn save_stock(&self, stock: Stock) -> Result<()>;

    /// 貸出可能数に増減を適用する
    ///
    /// 読み込み・検証・書き込みは1回の排他ロック（またはアトミックなクエリ）で行われ、
    /// 他の増減が割り込むことはない。結果が負になる場合は`InsufficientStock`で、
    /// 保存値は変更されない。これが不変条件の最終的な保証となる。
    async fn update_stock(&self, book_id: &str, delta: i64) -> Result<()>;
}
