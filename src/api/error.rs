use crate::application::{
    AuthorizationError, book::BookApplicationError, stock::StockApplicationError,
};
use crate::domain::ErrorKind;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、エラー種別からHTTPステータスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Authorization(AuthorizationError),
    Book(BookApplicationError),
    Stock(StockApplicationError),
    InvalidBody(JsonRejection),
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        ApiError::Authorization(err)
    }
}

impl From<BookApplicationError> for ApiError {
    fn from(err: BookApplicationError) -> Self {
        ApiError::Book(err)
    }
}

impl From<StockApplicationError> for ApiError {
    fn from(err: StockApplicationError) -> Self {
        ApiError::Stock(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::InvalidBody(err)
    }
}

/// エラー種別に対応するHTTPステータス
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::DuplicateId => StatusCode::CONFLICT,
        ErrorKind::InsufficientStock => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::MissingToken => StatusCode::UNAUTHORIZED,
        ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
        ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// エラーとその原因の連鎖を1行にまとめる（ログ用）
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (kind, err) = match &self {
            ApiError::Authorization(e) => (e.kind(), e as &dyn std::error::Error),
            ApiError::Book(e) => (e.kind(), e as &dyn std::error::Error),
            ApiError::Stock(e) => (e.kind(), e as &dyn std::error::Error),
            ApiError::InvalidBody(e) => (ErrorKind::InvalidInput, e as &dyn std::error::Error),
        };

        // 500系の詳細はログに記録し、クライアントには一般的なメッセージのみを返す
        let message = if kind == ErrorKind::UpstreamUnavailable {
            tracing::error!("Upstream failure: {}", error_chain(err));
            "A required upstream service is unavailable".to_string()
        } else {
            err.to_string()
        };

        let body = Json(ErrorResponse::new(kind.as_str(), message));
        (status_for(kind), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StoreError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::DuplicateId), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::MissingToken),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(ErrorKind::PermissionDenied),
            StatusCode::FORBIDDEN
        );
        assert!(status_for(ErrorKind::UpstreamUnavailable).is_server_error());
    }

    #[test]
    fn test_wrapped_store_kind_drives_status() {
        let err = ApiError::from(BookApplicationError::DeleteBookFailed {
            id: "6".to_string(),
            source: StoreError::book_not_found("6"),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_chain_includes_cause() {
        let err = BookApplicationError::LoadBookFailed {
            id: "9".to_string(),
            source: StoreError::book_not_found("9"),
        };
        assert_eq!(
            error_chain(&err),
            "could not load book with id 9: book with id 9 not found"
        );
    }
}
