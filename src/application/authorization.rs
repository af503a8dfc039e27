use crate::domain::{ErrorKind, PermissionMask};
use crate::ports::{PermissionGate, PermissionGateError};
use thiserror::Error;

/// 認可のエラー
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// トークンが指定されていない（ゲートには問い合わせない）
    #[error("Missing token")]
    MissingToken,

    /// 必要な権限を持たない
    #[error("Insufficient permissions")]
    PermissionDenied { required: PermissionMask },

    /// 権限を判定できなかった
    #[error("Error checking permission")]
    Unavailable(#[source] PermissionGateError),
}

impl AuthorizationError {
    /// エラー種別を取得する
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthorizationError::MissingToken => ErrorKind::MissingToken,
            AuthorizationError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            AuthorizationError::Unavailable(e) => e.kind(),
        }
    }
}

/// 変更操作の前に呼び出し元の権限を確認する
///
/// - トークンが空なら、ゲートに問い合わせず`MissingToken`
/// - ゲートが判定できなければ`Unavailable`（安全側に倒し、操作は行わない）
/// - 判定の結果が不許可なら`PermissionDenied`
#[tracing::instrument(skip(gate, token))]
pub async fn authorize(
    gate: &dyn PermissionGate,
    token: Option<&str>,
    required: PermissionMask,
) -> Result<(), AuthorizationError> {
    let token = match token.map(str::trim) {
        Some(token) if !token.is_empty() => token,
        _ => return Err(AuthorizationError::MissingToken),
    };

    let granted = gate
        .check_permissions(token, required)
        .await
        .map_err(AuthorizationError::Unavailable)?;

    if !granted {
        tracing::warn!("permission denied");
        return Err(AuthorizationError::PermissionDenied { required });
    }
    Ok(())
}
