use crate::application::{ServiceDependencies, authorize, book, stock};
use crate::domain::{
    Book, PermissionMask, Stock,
    permissions::{CHANGE_TOTAL_STOCK, LOAN_BOOKS, MANAGE_BOOKS},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{BookCreatedResponse, ChangeStockRequest, ListBooksQuery},
};

/// 書籍の作成・更新・削除に必要な権限
pub const REQUIRED_TO_MANAGE_BOOKS: PermissionMask = MANAGE_BOOKS;
/// 在庫レコードの新規登録に必要な権限
pub const REQUIRED_TO_CREATE_STOCK: PermissionMask = CHANGE_TOTAL_STOCK;
/// 貸出可能数の増減に必要な権限（いずれか1つ）
pub const REQUIRED_TO_CHANGE_STOCK: PermissionMask = CHANGE_TOTAL_STOCK | LOAN_BOOKS;

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// Authorizationヘッダーからトークンを取り出す
///
/// `Bearer `プレフィックスは取り除く。
fn auth_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
}

/// 呼び出し元の権限を確認する
///
/// 変更系ハンドラーはボディを解釈する前に必ずこれを呼ぶ。
async fn require(
    state: &AppState,
    headers: &HeaderMap,
    required: PermissionMask,
) -> Result<(), ApiError> {
    authorize(
        state.service_deps.permission_gate.as_ref(),
        auth_token(headers),
        required,
    )
    .await?;
    Ok(())
}

// ============================================================================
// Book handlers
// ============================================================================

/// GET /api/v1/books?criteria= - 書籍を検索
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let criteria = query.criteria.unwrap_or_default();
    let books = book::get_books(&state.service_deps, &criteria).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book = book::get_book_by_id(&state.service_deps, &id).await?;
    Ok(Json(book))
}

/// POST /api/v1/books/new - 書籍を作成
///
/// MANAGE_BOOKS権限が必要。
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<BookCreatedResponse>), ApiError> {
    require(&state, &headers, REQUIRED_TO_MANAGE_BOOKS).await?;
    let Json(new_book) = payload?;

    let id = book::create_book(&state.service_deps, new_book).await?;

    Ok((StatusCode::CREATED, Json(BookCreatedResponse { id })))
}

/// POST /api/v1/books/:id - 書籍を更新
///
/// MANAGE_BOOKS権限が必要。
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    require(&state, &headers, REQUIRED_TO_MANAGE_BOOKS).await?;
    let Json(replacement) = payload?;

    book::update_book(&state.service_deps, &id, replacement).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/books/:id - 書籍を削除
///
/// MANAGE_BOOKS権限が必要。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    require(&state, &headers, REQUIRED_TO_MANAGE_BOOKS).await?;

    book::delete_book(&state.service_deps, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Stock handlers
// ============================================================================

/// GET /api/v1/stocks/:book_id - 在庫を取得
pub async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<Stock>, ApiError> {
    let stock = stock::get_stock(&state.service_deps, &book_id).await?;
    Ok(Json(stock))
}

/// POST /api/v1/stocks/new - 在庫レコードを登録
///
/// CHANGE_TOTAL_STOCK権限が必要。
pub async fn create_stock(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Stock>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    require(&state, &headers, REQUIRED_TO_CREATE_STOCK).await?;
    let Json(new_stock) = payload?;

    stock::save_stock(&state.service_deps, new_stock).await?;

    Ok(StatusCode::CREATED)
}

/// POST /api/v1/stocks/:book_id/change - 貸出可能数を増減
///
/// CHANGE_TOTAL_STOCK または LOAN_BOOKS 権限が必要。
pub async fn change_stock(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ChangeStockRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    require(&state, &headers, REQUIRED_TO_CHANGE_STOCK).await?;
    let Json(req) = payload?;

    stock::change_stock(&state.service_deps, &book_id, req.delta).await?;

    Ok(StatusCode::NO_CONTENT)
}

