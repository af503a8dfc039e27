use library_catalog::adapters::memory::{MemoryBookStore, MemoryStockStore};
use library_catalog::adapters::mock::MockPermissionGate;
use library_catalog::application::ServiceDependencies;
use library_catalog::application::book::{
    BookApplicationError, create_book, delete_book, get_book_by_id, get_books, update_book,
};
use library_catalog::domain::{Book, ErrorKind};
use library_catalog::ports::BookStore;
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// テスト用ヘルパー
// ============================================================================

/// インメモリストアで依存関係を構築する
///
/// テストごとに独立したストアを使用する。
fn setup() -> (ServiceDependencies, Arc<MemoryBookStore>) {
    let book_store = Arc::new(MemoryBookStore::new());
    let deps = ServiceDependencies {
        book_store: book_store.clone(),
        stock_store: Arc::new(MemoryStockStore::new()),
        permission_gate: Arc::new(MockPermissionGate::new()),
    };
    (deps, book_store)
}

fn book(id: &str, title: &str, author: &str, description: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        description: description.to_string(),
    }
}

fn ids(books: &[Book]) -> HashSet<String> {
    books.iter().map(|b| b.id.clone()).collect()
}

fn id_set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn advanced_go() -> Book {
    book(
        "2",
        "Advanced Go",
        "Jane Smith",
        "An advanced Go programming guide",
    )
}

fn go_for_beginners() -> Book {
    book(
        "3",
        "Go for Beginners",
        "Alice Brown",
        "A beginner's guide to Go",
    )
}

fn cpp_book() -> Book {
    book(
        "4",
        "The C++ Programming Language (4th Edition)",
        "Bjarne Stroustrup",
        "Integrated coverage of the entire language",
    )
}

fn intro_to_go() -> Book {
    book(
        "5",
        "Intro to Go",
        "Chris White",
        "A basic introduction to Go",
    )
}

// ============================================================================
// 作成・取得
// ============================================================================

#[tokio::test]
async fn test_create_book_and_load_by_id() {
    // Arrange
    let (deps, store) = setup();
    let original = book("1", "Go Programming", "John Doe", "...");

    // Act
    let id = create_book(&deps, original.clone()).await.unwrap();

    // Assert: 返されたIDと保存内容を確認
    assert_eq!(id, "1");
    assert_eq!(store.load_book_by_id("1").await.unwrap(), original);
    assert_eq!(get_book_by_id(&deps, "1").await.unwrap(), original);
}

#[tokio::test]
async fn test_create_book_twice_yields_duplicate_id() {
    // Arrange
    let (deps, store) = setup();
    create_book(&deps, advanced_go()).await.unwrap();

    // Act: 同じIDで別内容を作成
    let result = create_book(&deps, book("2", "Other", "Someone", "Else")).await;

    // Assert: DuplicateIdで、最初のレコードが保持される
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateId);
    assert!(matches!(err, BookApplicationError::CreateBookFailed { ref id, .. } if id == "2"));
    assert_eq!(store.load_book_by_id("2").await.unwrap(), advanced_go());
}

#[tokio::test]
async fn test_create_book_with_empty_id_is_rejected() {
    let (deps, store) = setup();

    let err = create_book(&deps, book("", "No Id", "Nobody", ""))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_book_with_nul_is_rejected_before_the_store() {
    let (deps, store) = setup();
    let with_nul = Book {
        description: "A basic\0introduction".to_string(),
        ..intro_to_go()
    };

    let err = create_book(&deps, with_nul).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(matches!(err, BookApplicationError::InvalidBook(_)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_get_missing_book_preserves_not_found_kind() {
    let (deps, _) = setup();

    let err = get_book_by_id(&deps, "404").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    // 元のストアエラーが保持されていること
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.store_error().is_some());
}

// ============================================================================
// 検索
// ============================================================================

#[tokio::test]
async fn test_get_books_by_substring() {
    // Arrange
    let (deps, _) = setup();
    create_book(&deps, advanced_go()).await.unwrap();
    create_book(&deps, go_for_beginners()).await.unwrap();
    create_book(&deps, cpp_book()).await.unwrap();

    // Act & Assert
    let cpp = get_books(&deps, "C++").await.unwrap();
    assert_eq!(ids(&cpp), id_set(&["4"]));

    let advanced = get_books(&deps, "Advanced").await.unwrap();
    assert_eq!(ids(&advanced), id_set(&["2"]));

    // 著者・説明も検索対象
    let guides = get_books(&deps, "guide").await.unwrap();
    assert_eq!(ids(&guides), id_set(&["2", "3"]));

    // 大文字小文字は区別する
    let phrase = get_books(&deps, "advanced Go programming").await.unwrap();
    assert_eq!(ids(&phrase), id_set(&["2"]));
    assert!(get_books(&deps, "ADVANCED").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_criteria_returns_every_book() {
    let (deps, _) = setup();
    create_book(&deps, book("1", "A", "", "")).await.unwrap();
    create_book(&deps, book("2", "", "", "")).await.unwrap();

    let all = get_books(&deps, "").await.unwrap();

    assert_eq!(ids(&all), id_set(&["1", "2"]));
}

#[tokio::test]
async fn test_nul_criteria_matches_nothing() {
    let (deps, _) = setup();
    create_book(&deps, advanced_go()).await.unwrap();

    let found = get_books(&deps, "Go\0").await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_get_books_on_empty_store() {
    let (deps, _) = setup();
    assert!(get_books(&deps, "").await.unwrap().is_empty());
}

// ============================================================================
// 更新・削除
// ============================================================================

#[tokio::test]
async fn test_update_book() {
    // Arrange
    let (deps, store) = setup();
    create_book(&deps, intro_to_go()).await.unwrap();

    // Act
    let updated = Book {
        title: "Introduction to Go".to_string(),
        ..intro_to_go()
    };
    update_book(&deps, "5", updated.clone()).await.unwrap();

    // Assert
    assert_eq!(store.load_book_by_id("5").await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_with_nul_leaves_the_stored_book() {
    let (deps, store) = setup();
    create_book(&deps, intro_to_go()).await.unwrap();
    let with_nul = Book {
        title: "Intro\0to Go".to_string(),
        ..intro_to_go()
    };

    let err = update_book(&deps, "5", with_nul).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(store.load_book_by_id("5").await.unwrap(), intro_to_go());
}

#[tokio::test]
async fn test_update_missing_book() {
    let (deps, store) = setup();

    let err = update_book(&deps, "5", intro_to_go()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, BookApplicationError::UpdateBookFailed { .. }));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete_book() {
    // Arrange
    let (deps, store) = setup();
    let learn_go = book("6", "Learn Go", "David Black", "");
    create_book(&deps, learn_go).await.unwrap();

    // Act
    delete_book(&deps, "6").await.unwrap();

    // Assert
    assert!(store.load_book_by_id("6").await.is_err());
}

#[tokio::test]
async fn test_delete_missing_book() {
    let (deps, _) = setup();

    let err = delete_book(&deps, "6").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, BookApplicationError::DeleteBookFailed { ref id, .. } if id == "6"));
}
