use serde::{Deserialize, Serialize};

/// 書籍の在庫レコード
///
/// 不変条件：`available_stock`はすべての増減後も0以上。
/// `total_stock`と`lent_stock`は参考値であり、増減処理では再計算しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stock {
    #[serde(rename = "bookID")]
    pub book_id: String,
    #[serde(rename = "totalStock")]
    pub total_stock: i64,
    #[serde(rename = "lentStock")]
    pub lent_stock: i64,
    #[serde(rename = "availableStock")]
    pub available_stock: i64,
}

/// 在庫増減のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDeltaError {
    /// 増減後の貸出可能数が負になる
    Insufficient { available: i64 },
    /// 加算がi64の範囲を超える
    Overflow,
}

impl Stock {
    /// 増減を適用した後の貸出可能数を計算する（純粋な関数）
    ///
    /// レコード自体は変更しない。
    ///
    /// # エラー
    /// - `Insufficient`: 結果が負になる
    /// - `Overflow`: 加算がオーバーフローする
    pub fn available_after(&self, delta: i64) -> Result<i64, StockDeltaError> {
        let next = self
            .available_stock
            .checked_add(delta)
            .ok_or(StockDeltaError::Overflow)?;

        if next < 0 {
            return Err(StockDeltaError::Insufficient {
                available: self.available_stock,
            });
        }
        Ok(next)
    }

    /// 新規登録時の数量が妥当か（すべて0以上か）
    pub fn has_valid_quantities(&self) -> bool {
        self.total_stock >= 0 && self.lent_stock >= 0 && self.available_stock >= 0
    }
}
