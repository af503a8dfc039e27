use crate::domain::Book;
use crate::ports::book_store::{BookStore as BookStoreTrait, Result, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of BookStore
///
/// One reader/writer lock guards the whole map: loads share the read lock,
/// every mutation takes the write lock.
pub struct BookStore {
    books: RwLock<HashMap<String, Book>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
        }
    }

    /// Number of books currently stored
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    async fn load_books(&self, criteria: &str) -> Result<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books
            .values()
            .filter(|book| book.matches(criteria))
            .cloned()
            .collect())
    }

    async fn load_book_by_id(&self, id: &str) -> Result<Book> {
        let books = self.books.read().await;
        books
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::book_not_found(id))
    }

    async fn save_book(&self, book: Book) -> Result<String> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.id) {
            return Err(StoreError::duplicate_book(book.id));
        }

        let id = book.id.clone();
        books.insert(id.clone(), book);
        Ok(id)
    }

    async fn update_book(&self, id: &str, book: Book) -> Result<()> {
        let mut books = self.books.write().await;
        match books.get_mut(id) {
            Some(stored) => {
                *stored = Book {
                    id: stored.id.clone(),
                    ..book
                };
                Ok(())
            }
            None => Err(StoreError::book_not_found(id)),
        }
    }

    async fn delete_book(&self, id: &str) -> Result<()> {
        let mut books = self.books.write().await;
        books
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::book_not_found(id))
    }
}
