use crate::domain::{ErrorKind, PermissionMask};
use async_trait::async_trait;
use thiserror::Error;

/// 権限チェックのエラー
///
/// いずれも「権限を判定できなかった」ことを表し、「権限なし」とは区別される。
#[derive(Debug, Error)]
pub enum PermissionGateError {
    /// ユーザーサービスへのリクエスト送信に失敗
    #[error("error sending request to user service")]
    Transport(#[from] reqwest::Error),

    /// ユーザーサービスが200以外を返した
    #[error("failed to check permissions, status: {0}")]
    UnexpectedStatus(u16),

    /// レスポンスを解釈できない
    #[error("invalid permissions response: {0}")]
    InvalidResponse(String),

    /// 権限サービスが利用できない
    #[error("permission service unavailable: {0}")]
    Unavailable(String),
}

impl PermissionGateError {
    /// エラー種別を取得する（常に`UpstreamUnavailable`）
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::UpstreamUnavailable
    }
}

pub type Result<T> = std::result::Result<T, PermissionGateError>;

/// 権限ゲートポート
///
/// 外部のユーザー識別サービスとの境界を維持する。
/// カタログはトークンの権限ビットマスクを解釈せず、必要なマスクとの交差のみを問う。
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// トークンが必要な権限を満たすか確認する
    ///
    /// `granted & required != 0` のとき`Ok(true)`、満たさないとき`Ok(false)`。
    /// 判定できなかった場合は`Err`。
    async fn check_permissions(&self, token: &str, required: PermissionMask) -> Result<bool>;
}
