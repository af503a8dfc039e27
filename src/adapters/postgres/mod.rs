pub mod book_store;
pub mod stock_store;

use sqlx::{PgPool, postgres::PgPoolOptions};

// パブリックに型を再エクスポート
pub use book_store::BookStore as PostgresBookStore;
pub use stock_store::StockStore as PostgresStockStore;

/// コネクションプールを作成し、マイグレーションを適用する
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, Box<dyn std::error::Error + Send + Sync>> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// TEXT型が保持できないNUL文字を含むか
///
/// 含む値は保存済みのどの行とも一致しないため、クエリを発行せずに結果が決まる。
fn contains_nul(value: &str) -> bool {
    value.contains('\0')
}
