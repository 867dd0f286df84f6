//! `sessionStorage`-backed key-value store
//!
//! Per tab, and kept across the full navigation to the payment gateway and back.

use party_payments::{KeyValueStore, PaymentError, Result};

/// Key prefix baked in at build time, for deployments sharing one origin
const BUILD_NAMESPACE: Option<&str> = option_env!("PARTY_STORAGE_NAMESPACE");

#[derive(Clone, Debug, Default)]
pub struct SessionStorage {
    namespace: Option<String>,
}

impl SessionStorage {
    /// Store using bare key names
    pub const fn new() -> Self {
        Self { namespace: None }
    }

    /// Store whose keys are prefixed `"{namespace}:"`
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
        }
    }

    /// Store for this build: namespaced when `PARTY_STORAGE_NAMESPACE` was set
    /// at compile time, bare keys otherwise
    pub fn configured() -> Self {
        Self::for_namespace(BUILD_NAMESPACE)
    }

    fn for_namespace(namespace: Option<&str>) -> Self {
        match namespace.filter(|ns| !ns.is_empty()) {
            Some(namespace) => Self::with_namespace(namespace),
            None => Self::new(),
        }
    }

    fn key(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{key}"),
            None => key.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| PaymentError::Storage("no window".into()))?
            .session_storage()
            .map_err(|e| PaymentError::Storage(format!("{e:?}")))?
            .ok_or_else(|| PaymentError::Storage("sessionStorage unavailable".into()))
    }
}

impl KeyValueStore for SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(&self.key(key))
            .map_err(|e| PaymentError::Storage(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(&self.key(key), value)
            .map_err(|e| PaymentError::Storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::storage()?
            .remove_item(&self.key(key))
            .map_err(|e| PaymentError::Storage(format!("{e:?}")))
    }
}
