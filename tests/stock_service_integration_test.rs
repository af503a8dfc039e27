use async_trait::async_trait;
use library_catalog::adapters::memory::{MemoryBookStore, MemoryStockStore};
use library_catalog::adapters::mock::MockPermissionGate;
use library_catalog::application::ServiceDependencies;
use library_catalog::application::stock::{
    StockApplicationError, change_stock, get_stock, save_stock,
};
use library_catalog::domain::{ErrorKind, Stock};
use library_catalog::ports::StockStore;
use library_catalog::ports::stock_store;
use std::sync::Arc;

// ============================================================================
// テスト用ヘルパー
// ============================================================================

fn deps_with(stock_store: Arc<dyn StockStore>) -> ServiceDependencies {
    ServiceDependencies {
        book_store: Arc::new(MemoryBookStore::new()),
        stock_store,
        permission_gate: Arc::new(MockPermissionGate::new()),
    }
}

fn setup() -> (ServiceDependencies, Arc<MemoryStockStore>) {
    let store = Arc::new(MemoryStockStore::new());
    (deps_with(store.clone()), store)
}

fn stock(book_id: &str, available: i64, lent: i64) -> Stock {
    Stock {
        book_id: book_id.to_string(),
        total_stock: available + lent,
        lent_stock: lent,
        available_stock: available,
    }
}

/// 読み込みだけ古い値を返すStockStore
///
/// サービスの事前チェックと書き込みの間に他の呼び出しが割り込んだ状況を再現する。
/// 書き込みは実際のストアに委譲する。
struct StaleReadStockStore {
    inner: MemoryStockStore,
    stale_available: i64,
}

#[async_trait]
impl StockStore for StaleReadStockStore {
    async fn load_stock(&self, book_id: &str) -> stock_store::Result<Stock> {
        let mut current = self.inner.load_stock(book_id).await?;
        current.available_stock = self.stale_available;
        Ok(current)
    }

    async fn save_stock(&self, stock: Stock) -> stock_store::Result<()> {
        self.inner.save_stock(stock).await
    }

    async fn update_stock(&self, book_id: &str, delta: i64) -> stock_store::Result<()> {
        self.inner.update_stock(book_id, delta).await
    }
}

// ============================================================================
// 登録・取得
// ============================================================================

#[tokio::test]
async fn test_save_and_get_stock() {
    let (deps, _) = setup();
    let original = stock("1", 10, 2);

    save_stock(&deps, original.clone()).await.unwrap();

    assert_eq!(get_stock(&deps, "1").await.unwrap(), original);
}

#[tokio::test]
async fn test_save_stock_twice_yields_duplicate_id() {
    let (deps, store) = setup();
    save_stock(&deps, stock("1", 10, 0)).await.unwrap();

    let err = save_stock(&deps, stock("1", 99, 0)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateId);
    assert_eq!(store.load_stock("1").await.unwrap().available_stock, 10);
}

#[tokio::test]
async fn test_save_stock_rejects_negative_quantities() {
    let (deps, store) = setup();

    let err = save_stock(&deps, stock("1", -1, 0)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = save_stock(&deps, stock("", 1, 0)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    assert!(store.load_stock("1").await.is_err());
}

#[tokio::test]
async fn test_save_stock_rejects_nul_in_book_id() {
    let (deps, store) = setup();

    let err = save_stock(&deps, stock("1\0", 1, 0)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(matches!(err, StockApplicationError::InvalidStock(_)));
    assert!(store.load_stock("1\0").await.is_err());
}

#[tokio::test]
async fn test_stock_for_unknown_book_is_accepted() {
    // 書籍ストアとの参照整合性は検証しない
    let (deps, _) = setup();

    save_stock(&deps, stock("no-such-book", 1, 0)).await.unwrap();

    let saved = get_stock(&deps, "no-such-book").await.unwrap();
    assert_eq!(saved.available_stock, 1);
}

#[tokio::test]
async fn test_get_missing_stock() {
    let (deps, _) = setup();

    let err = get_stock(&deps, "missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, StockApplicationError::LoadStockFailed { .. }));
}

// ============================================================================
// 増減
// ============================================================================

#[tokio::test]
async fn test_change_stock_increase() {
    let (deps, _) = setup();
    save_stock(&deps, stock("2", 5, 0)).await.unwrap();

    change_stock(&deps, "2", 3).await.unwrap();

    assert_eq!(get_stock(&deps, "2").await.unwrap().available_stock, 8);
}

#[tokio::test]
async fn test_change_stock_decrease() {
    let (deps, _) = setup();
    save_stock(&deps, stock("3", 5, 0)).await.unwrap();

    change_stock(&deps, "3", -2).await.unwrap();

    let updated = get_stock(&deps, "3").await.unwrap();
    assert_eq!(updated.available_stock, 3);
    // totalStock/lentStockは増減で再計算されない
    assert_eq!(updated.total_stock, 5);
    assert_eq!(updated.lent_stock, 0);
}

#[tokio::test]
async fn test_change_stock_insufficient() {
    // Arrange
    let (deps, store) = setup();
    save_stock(&deps, stock("4", 3, 0)).await.unwrap();

    // Act: 貸出可能数を負にしようとする
    let err = change_stock(&deps, "4", -5).await.unwrap_err();

    // Assert: 事前チェックで拒否され、保存値は変わらない
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);
    assert!(matches!(
        err,
        StockApplicationError::InsufficientStock { ref book_id, delta: -5, available: 3 } if book_id == "4"
    ));
    assert_eq!(store.load_stock("4").await.unwrap().available_stock, 3);
}

#[tokio::test]
async fn test_change_stock_overflow() {
    let (deps, store) = setup();
    save_stock(&deps, stock("5", 1, 0)).await.unwrap();

    let err = change_stock(&deps, "5", i64::MAX).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(store.load_stock("5").await.unwrap().available_stock, 1);
}

#[tokio::test]
async fn test_change_missing_stock() {
    let (deps, _) = setup();

    let err = change_stock(&deps, "missing", 1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_floor_holds_over_a_sequence_of_deltas() {
    let (deps, store) = setup();
    save_stock(&deps, stock("6", 2, 0)).await.unwrap();

    let deltas = [-1, -2, 3, -4, -3, 1, -1, -1];
    let mut expected: i64 = 2;
    for delta in deltas {
        let result = change_stock(&deps, "6", delta).await;
        if expected + delta >= 0 {
            assert!(result.is_ok(), "delta {} should apply", delta);
            expected += delta;
        } else {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InsufficientStock);
        }

        let available = store.load_stock("6").await.unwrap().available_stock;
        assert!(available >= 0);
        assert_eq!(available, expected);
    }
}

#[tokio::test]
async fn test_store_check_is_authoritative_when_precheck_is_stale() {
    // Arrange: 実際は1冊だが、読み込みは10冊と報告する
    let inner = MemoryStockStore::new();
    inner.save_stock(stock("7", 1, 0)).await.unwrap();
    let stale = Arc::new(StaleReadStockStore {
        inner,
        stale_available: 10,
    });
    let deps = deps_with(stale.clone());

    // Act: 事前チェックは通過するが、ストアの更新で拒否される
    let err = change_stock(&deps, "7", -5).await.unwrap_err();

    // Assert
    assert!(matches!(err, StockApplicationError::UpdateStockFailed { .. }));
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);
    let stored = stale.inner.load_stock("7").await.unwrap();
    assert_eq!(stored.available_stock, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_changes_race_down_to_exactly_zero() {
    // Arrange
    let (deps, store) = setup();
    save_stock(&deps, stock("8", 10, 0)).await.unwrap();

    // Act: 10冊に対して25件の並行した-1
    let handles: Vec<_> = (0..25)
        .map(|_| {
            let deps = deps.clone();
            tokio::spawn(async move { change_stock(&deps, "8", -1).await })
        })
        .collect();

    let results = futures::future::join_all(handles).await;

    // Assert: ちょうど10件成功し、残りはInsufficientStock
    let mut succeeded = 0;
    for result in results {
        match result.unwrap() {
            Ok(()) => succeeded += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::InsufficientStock),
        }
    }
    assert_eq!(succeeded, 10);
    assert_eq!(store.load_stock("8").await.unwrap().available_stock, 0);
}
