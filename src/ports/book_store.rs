use crate::domain::Book;
use async_trait::async_trait;

pub use super::errors::{Result, StoreError};

/// 書籍ストアポート
///
/// 書籍レコードの永続化を抽象化する。
/// サービス層はこのトレイトに対してのみ記述され、バックエンドに依存しない。
#[async_trait]
pub trait BookStore: Send + Sync {
    /// 検索条件にマッチする書籍をすべて返す
    ///
    /// タイトル・著者・説明のいずれかが`criteria`を含む書籍を返す。
    /// 空文字列はすべての書籍にマッチする。順序は保証しない。
    async fn load_books(&self, criteria: &str) -> Result<Vec<Book>>;

    /// IDで書籍を取得する
    ///
    /// 存在しない場合は`NotFound`。
    async fn load_book_by_id(&self, id: &str) -> Result<Book>;

    /// 書籍を新規保存し、そのIDを返す
    ///
    /// 同じIDが既に存在する場合は`DuplicateId`で、既存レコードは変更されない。
    async fn save_book(&self, book: Book) -> Result<String>;

    /// 書籍を更新する
    ///
    /// 保存キーは`id`。`book.id`は検証されず、キー以外の全フィールドが上書きされる。
    /// 存在しない場合は`NotFound`。
    async fn update_book(&self, id: &str, book: Book) -> Result<()>;

    /// 書籍を削除する
    ///
    /// 存在しない場合は`NotFound`。
    async fn delete_book(&self, id: &str) -> Result<()>;
}
