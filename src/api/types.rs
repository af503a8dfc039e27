use serde::{Deserialize, Serialize};

/// 書籍一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    /// タイトル・著者・説明に対する部分文字列（省略時はすべて）
    pub criteria: Option<String>,
}

/// 書籍作成レスポンス（POST /api/v1/books/new）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookCreatedResponse {
    pub id: String,
}

/// 在庫増減リクエスト（POST /api/v1/stocks/:book_id/change）
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeStockRequest {
    pub delta: i64,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error_type.into(),
            message: message.into(),
        }
    }
}
