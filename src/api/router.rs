use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, change_stock, create_book, create_stock, delete_book, get_book, get_stock,
    list_books, update_book,
};

/// Creates the API router with all catalog endpoints
///
/// Query endpoints (no token required):
/// - GET /api/v1/books?criteria= - Search books
/// - GET /api/v1/books/:id - Get a book
/// - GET /api/v1/stocks/:book_id - Get stock for a book
///
/// Mutating endpoints (permission-gated):
/// - POST /api/v1/books/new - Create a book
/// - POST /api/v1/books/:id - Update a book
/// - DELETE /api/v1/books/:id - Delete a book
/// - POST /api/v1/stocks/new - Register stock for a book
/// - POST /api/v1/stocks/:book_id/change - Apply a delta to available stock
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Books
        .route("/api/v1/books", get(list_books))
        .route("/api/v1/books/new", post(create_book))
        .route(
            "/api/v1/books/:id",
            get(get_book).post(update_book).delete(delete_book),
        )
        // Stock
        .route("/api/v1/stocks/new", post(create_stock))
        .route("/api/v1/stocks/:book_id", get(get_stock))
        .route("/api/v1/stocks/:book_id/change", post(change_stock))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
