use serde::{Deserialize, Serialize};

/// 書籍 - カタログの集約
///
/// `id`は呼び出し側が採番し、作成後は変更されない。
/// 更新時は`id`以外のすべてのフィールドが置き換えられる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
}

impl Book {
    /// 検索条件にマッチするか判定する
    ///
    /// タイトル・著者・説明のいずれかが`criteria`を部分文字列として含めばマッチ。
    /// 大文字小文字を区別する完全一致の部分文字列判定で、空文字列はすべてにマッチする。
    pub fn matches(&self, criteria: &str) -> bool {
        self.title.contains(criteria)
            || self.author.contains(criteria)
            || self.description.contains(criteria)
    }

    /// IDが有効か（空でないか）
    pub fn has_valid_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// すべてのテキスト項目がNUL文字を含まないか
    ///
    /// PostgreSQLのTEXT型はNULを保持できないため、バックエンドに関わらず受け付けない。
    pub fn has_storable_text(&self) -> bool {
        [&self.id, &self.title, &self.author, &self.description]
            .iter()
            .all(|field| !field.contains('\0'))
    }
}
