use crate::domain::{PermissionMask, permissions};
use crate::ports::permission_gate::{
    PermissionGate as PermissionGateTrait, PermissionGateError, Result,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Mock implementation of PermissionGate
///
/// Supports stateful testing by mapping tokens to granted masks.
/// Unknown tokens are granted nothing. Can be switched into an outage
/// where every check fails as if the user service were unreachable.
pub struct PermissionGate {
    grants: Mutex<HashMap<String, PermissionMask>>,
    unavailable: AtomicBool,
    checks: AtomicUsize,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self {
            grants: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            checks: AtomicUsize::new(0),
        }
    }

    /// Register the mask granted to a token for testing purposes
    pub fn grant(&self, token: impl Into<String>, mask: PermissionMask) {
        self.grants.lock().unwrap().insert(token.into(), mask);
    }

    /// Simulate the user service being unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of checks performed so far
    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionGateTrait for PermissionGate {
    async fn check_permissions(&self, token: &str, required: PermissionMask) -> Result<bool> {
        self.checks.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PermissionGateError::Unavailable("mock user service is down".to_string()));
        }

        let grants = self.grants.lock().unwrap();
        let granted = grants.get(token).copied().unwrap_or(0);
        Ok(permissions::grants(granted, required))
    }
}
