use crate::domain::ErrorKind;
use thiserror::Error;

/// 書籍エンティティ名（エラーメッセージ用）
pub const BOOK_ENTITY: &str = "book";
/// 在庫エンティティ名（エラーメッセージ用）
pub const STOCK_ENTITY: &str = "stock";

/// ストアポート共通のエラー
///
/// インメモリ実装とPostgreSQL実装の両方がこの型を返す。
#[derive(Debug, Error)]
pub enum StoreError {
    /// 指定キーのレコードが存在しない
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// 指定キーのレコードが既に存在する
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: &'static str, id: String },

    /// 増減後の貸出可能数が負になる
    #[error("not enough stock for book with id {book_id}: available {available}, delta {delta}")]
    InsufficientStock {
        book_id: String,
        delta: i64,
        available: i64,
    },

    /// 増減の加算がオーバーフローする
    #[error("stock delta {delta} overflows available stock for book with id {book_id}")]
    StockOverflow { book_id: String, delta: i64 },

    /// 永続化バックエンドのエラー
    #[error("storage backend error")]
    Backend(#[from] sqlx::Error),
}

impl StoreError {
    pub fn book_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: BOOK_ENTITY,
            id: id.into(),
        }
    }

    pub fn duplicate_book(id: impl Into<String>) -> Self {
        StoreError::DuplicateId {
            entity: BOOK_ENTITY,
            id: id.into(),
        }
    }

    pub fn stock_not_found(book_id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: STOCK_ENTITY,
            id: book_id.into(),
        }
    }

    pub fn duplicate_stock(book_id: impl Into<String>) -> Self {
        StoreError::DuplicateId {
            entity: STOCK_ENTITY,
            id: book_id.into(),
        }
    }

    /// エラー種別を取得する
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::DuplicateId { .. } => ErrorKind::DuplicateId,
            StoreError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            StoreError::StockOverflow { .. } => ErrorKind::InvalidInput,
            StoreError::Backend(_) => ErrorKind::UpstreamUnavailable,
        }
    }
}

/// ストアポートの Result型
pub type Result<T> = std::result::Result<T, StoreError>;
