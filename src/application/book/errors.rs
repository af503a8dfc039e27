use crate::domain::ErrorKind;
use crate::ports::StoreError;
use thiserror::Error;

/// 書籍管理アプリケーション層のエラー
///
/// ストアのエラーは`source`として保持され、`kind()`で元の種別を参照できる。
#[derive(Debug, Error)]
pub enum BookApplicationError {
    /// 書籍の入力値が不正
    #[error("Invalid book: {0}")]
    InvalidBook(String),

    /// 検索に失敗
    #[error("could not load books matching {criteria:?}")]
    LoadBooksFailed {
        criteria: String,
        #[source]
        source: StoreError,
    },

    /// IDでの取得に失敗
    #[error("could not load book with id {id}")]
    LoadBookFailed {
        id: String,
        #[source]
        source: StoreError,
    },

    /// 作成に失敗
    #[error("could not create book with id {id}")]
    CreateBookFailed {
        id: String,
        #[source]
        source: StoreError,
    },

    /// 更新に失敗
    #[error("could not update book with id {id}")]
    UpdateBookFailed {
        id: String,
        #[source]
        source: StoreError,
    },

    /// 削除に失敗
    #[error("could not delete book with id {id}")]
    DeleteBookFailed {
        id: String,
        #[source]
        source: StoreError,
    },
}

impl BookApplicationError {
    /// エラー種別を取得する
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookApplicationError::InvalidBook(_) => ErrorKind::InvalidInput,
            BookApplicationError::LoadBooksFailed { source, .. }
            | BookApplicationError::LoadBookFailed { source, .. }
            | BookApplicationError::CreateBookFailed { source, .. }
            | BookApplicationError::UpdateBookFailed { source, .. }
            | BookApplicationError::DeleteBookFailed { source, .. } => source.kind(),
        }
    }

    /// ラップされたストアのエラー
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            BookApplicationError::InvalidBook(_) => None,
            BookApplicationError::LoadBooksFailed { source, .. }
            | BookApplicationError::LoadBookFailed { source, .. }
            | BookApplicationError::CreateBookFailed { source, .. }
            | BookApplicationError::UpdateBookFailed { source, .. }
            | BookApplicationError::DeleteBookFailed { source, .. } => Some(source),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookApplicationError>;
