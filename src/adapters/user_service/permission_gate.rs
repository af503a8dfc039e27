use crate::domain::{PermissionMask, permissions};
use crate::ports::permission_gate::{
    PermissionGate as PermissionGateTrait, PermissionGateError, Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PermissionsRequest<'a> {
    token: &'a str,
}

/// Body returned by `POST /user/permissions`
///
/// The granted mask travels as a decimal string. Older user-service builds
/// spell the key `permissios`.
#[derive(Debug, Deserialize)]
struct PermissionsResponse {
    #[serde(alias = "permissios")]
    permissions: String,
}

/// Remote PermissionGate backed by the user-identity service
///
/// Posts the caller's token and tests the returned mask locally.
/// Any transport, status or decoding failure is an error, never a denial.
/// A request that outlives the client timeout fails as a transport error.
pub struct UserServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl UserServiceClient {
    /// `base_url` is `host:port` or a full `http(s)://` origin
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{}", base_url)
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn permissions_url(&self) -> String {
        format!("{}/user/permissions", self.base_url)
    }

    /// Fetch the caller's granted mask
    pub async fn granted_permissions(&self, token: &str) -> Result<PermissionMask> {
        let response = self
            .http
            .post(self.permissions_url())
            .json(&PermissionsRequest { token })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PermissionGateError::UnexpectedStatus(status.as_u16()));
        }

        let body: PermissionsResponse = response
            .json()
            .await
            .map_err(|e| PermissionGateError::InvalidResponse(e.to_string()))?;

        body.permissions
            .trim()
            .parse::<PermissionMask>()
            .map_err(|e| {
                PermissionGateError::InvalidResponse(format!(
                    "error converting permission value {:?}: {}",
                    body.permissions, e
                ))
            })
    }
}

#[async_trait]
impl PermissionGateTrait for UserServiceClient {
    async fn check_permissions(&self, token: &str, required: PermissionMask) -> Result<bool> {
        let granted = self.granted_permissions(token).await?;
        Ok(permissions::grants(granted, required))
    }
}
