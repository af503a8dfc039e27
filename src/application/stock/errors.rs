use crate::domain::ErrorKind;
use crate::ports::StoreError;
use thiserror::Error;

/// 在庫管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum StockApplicationError {
    /// 在庫の入力値が不正
    #[error("Invalid stock: {0}")]
    InvalidStock(String),

    /// 取得に失敗
    #[error("could not load stock for book with id {book_id}")]
    LoadStockFailed {
        book_id: String,
        #[source]
        source: StoreError,
    },

    /// 新規保存に失敗
    #[error("could not save stock for book with id {book_id}")]
    SaveStockFailed {
        book_id: String,
        #[source]
        source: StoreError,
    },

    /// 事前チェックで貸出可能数が負になると判定された
    #[error("unavailable delta {delta} for book with id {book_id} (available {available})")]
    InsufficientStock {
        book_id: String,
        delta: i64,
        available: i64,
    },

    /// 増減の加算がオーバーフローする
    #[error("delta {delta} overflows available stock for book with id {book_id}")]
    DeltaOverflow { book_id: String, delta: i64 },

    /// 増減の書き込みに失敗（ストアの最終チェックによる拒否を含む）
    #[error("could not update stock for book with id {book_id}")]
    UpdateStockFailed {
        book_id: String,
        delta: i64,
        #[source]
        source: StoreError,
    },
}

impl StockApplicationError {
    /// エラー種別を取得する
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockApplicationError::InvalidStock(_)
            | StockApplicationError::DeltaOverflow { .. } => ErrorKind::InvalidInput,
            StockApplicationError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            StockApplicationError::LoadStockFailed { source, .. }
            | StockApplicationError::SaveStockFailed { source, .. }
            | StockApplicationError::UpdateStockFailed { source, .. } => source.kind(),
        }
    }

    /// ラップされたストアのエラー
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            StockApplicationError::LoadStockFailed { source, .. }
            | StockApplicationError::SaveStockFailed { source, .. }
            | StockApplicationError::UpdateStockFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, StockApplicationError>;
