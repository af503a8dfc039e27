use crate::ports::*;
use std::sync::Arc;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、サービス関数に依存関係を明示的に渡す。
/// グローバル状態は持たないため、テストごとに独立したインスタンスを構築できる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_store: Arc<dyn BookStore>,
    pub stock_store: Arc<dyn StockStore>,
    pub permission_gate: Arc<dyn PermissionGate>,
}
