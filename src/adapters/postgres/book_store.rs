use crate::domain::Book;
use crate::ports::book_store::{BookStore as BookStoreTrait, Result, StoreError};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::contains_nul;

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Book {
    Book {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        description: row.get("description"),
    }
}

/// BookStoreのPostgreSQL実装
///
/// インメモリ実装と同じ契約を満たす。
/// 検索は`strpos`による大文字小文字を区別する部分文字列判定で、
/// LIKEのワイルドカード（`%`, `_`）は解釈しない。
/// NUL文字を含むキーや検索条件は、インメモリ実装と同じく単に一致なしとして扱う。
pub struct BookStore {
    pool: PgPool,
}

impl BookStore {
    /// PostgreSQLコネクションプールから新しいBookStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    async fn load_books(&self, criteria: &str) -> Result<Vec<Book>> {
        if contains_nul(criteria) {
            return Ok(Vec::new());
        }

        let books = sqlx::query(
            r#"
            SELECT id, title, author, description
            FROM books
            WHERE strpos(title, $1) > 0
               OR strpos(author, $1) > 0
               OR strpos(description, $1) > 0
            "#,
        )
        .bind(criteria)
        .fetch(&self.pool)
        .map_ok(|row| map_row_to_book(&row))
        .try_collect::<Vec<_>>()
        .await?;

        Ok(books)
    }

    async fn load_book_by_id(&self, id: &str) -> Result<Book> {
        if contains_nul(id) {
            return Err(StoreError::book_not_found(id));
        }

        let row = sqlx::query(
            r#"
            SELECT id, title, author, description
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(map_row_to_book)
            .ok_or_else(|| StoreError::book_not_found(id))
    }

    /// 主キー衝突時は何も挿入せず、影響行数0を重複として扱う
    async fn save_book(&self, book: Book) -> Result<String> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (id, title, author, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::duplicate_book(book.id));
        }
        Ok(book.id)
    }

    async fn update_book(&self, id: &str, book: Book) -> Result<()> {
        if contains_nul(id) {
            return Err(StoreError::book_not_found(id));
        }

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::book_not_found(id));
        }
        Ok(())
    }

    async fn delete_book(&self, id: &str) -> Result<()> {
        if contains_nul(id) {
            return Err(StoreError::book_not_found(id));
        }

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::book_not_found(id));
        }
        Ok(())
    }
}
