use crate::domain::Book;

use super::super::ServiceDependencies;
use super::errors::{BookApplicationError, Result};

/// 検索条件で書籍を取得する
///
/// 空の検索条件はすべての書籍を返す。順序は保証しない。
#[tracing::instrument(skip(deps))]
pub async fn get_books(deps: &ServiceDependencies, criteria: &str) -> Result<Vec<Book>> {
    deps.book_store
        .load_books(criteria)
        .await
        .map_err(|source| BookApplicationError::LoadBooksFailed {
            criteria: criteria.to_string(),
            source,
        })
}

/// IDで書籍を取得する
#[tracing::instrument(skip(deps))]
pub async fn get_book_by_id(deps: &ServiceDependencies, id: &str) -> Result<Book> {
    deps.book_store.load_book_by_id(id).await.map_err(|source| {
        BookApplicationError::LoadBookFailed {
            id: id.to_string(),
            source,
        }
    })
}

/// 書籍を作成する
///
/// ビジネスルール：
/// - IDが空でないこと
/// - テキスト項目がNUL文字を含まないこと
/// - 同じIDの書籍が存在しないこと（ストアが`DuplicateId`で拒否）
///
/// # 戻り値
/// ストアが返した書籍ID
#[tracing::instrument(skip(deps, book), fields(book_id = %book.id))]
pub async fn create_book(deps: &ServiceDependencies, book: Book) -> Result<String> {
    if !book.has_valid_id() {
        return Err(BookApplicationError::InvalidBook("book id must not be empty".to_string()));
    }
    ensure_storable(&book)?;

    let id = book.id.clone();
    let created = deps
        .book_store
        .save_book(book)
        .await
        .map_err(|source| BookApplicationError::CreateBookFailed { id, source })?;

    tracing::debug!("book created");
    Ok(created)
}

/// 書籍を更新する
///
/// キーは`id`で、`book.id`は検証しない。`id`以外の全フィールドを置き換える。
/// テキスト項目がNUL文字を含む場合はストアを呼ばずに拒否する。
#[tracing::instrument(skip(deps, book))]
pub async fn update_book(deps: &ServiceDependencies, id: &str, book: Book) -> Result<()> {
    ensure_storable(&book)?;

    deps.book_store
        .update_book(id, book)
        .await
        .map_err(|source| BookApplicationError::UpdateBookFailed {
            id: id.to_string(),
            source,
        })?;

    tracing::debug!("book updated");
    Ok(())
}

/// 書籍を削除する
///
/// 在庫レコードは連動して削除しない。
#[tracing::instrument(skip(deps))]
pub async fn delete_book(deps: &ServiceDependencies, id: &str) -> Result<()> {
    deps.book_store.delete_book(id).await.map_err(|source| {
        BookApplicationError::DeleteBookFailed {
            id: id.to_string(),
            source,
        }
    })?;

    tracing::debug!("book deleted");
    Ok(())
}

fn ensure_storable(book: &Book) -> Result<()> {
    if !book.has_storable_text() {
        return Err(BookApplicationError::InvalidBook(
            "book fields must not contain NUL characters".to_string(),
        ));
    }
    Ok(())
}
