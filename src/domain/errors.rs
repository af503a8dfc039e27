/// エラー種別
///
/// 各層のエラー型はこの種別を報告する。
/// サービス層でラップされても元の種別は保持され、API層でのステータス決定に使用される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 指定キーのエンティティが存在しない
    NotFound,
    /// 既に存在するキーで作成しようとした
    DuplicateId,
    /// 在庫の増減で貸出可能数が負になる
    InsufficientStock,
    /// 入力値が不正（空ID、NUL文字、負の数量、オーバーフロー）
    InvalidInput,
    /// トークンが指定されていない
    MissingToken,
    /// 権限チェックの結果、必要な権限を持たない
    PermissionDenied,
    /// 権限サービスまたは永続化バックエンドに到達できない
    UpstreamUnavailable,
}

impl ErrorKind {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::DuplicateId => "DUPLICATE_ID",
            ErrorKind::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::MissingToken => "MISSING_TOKEN",
            ErrorKind::PermissionDenied => "PERMISSION_DENIED",
            ErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
