//! Browser-Scoped Storage
//!
//! The flow survives a full navigation to the payment gateway and back, so
//! everything it needs is written to a key-value medium that outlives the page:
//! `sessionStorage` in the browser, [`MemoryKeyValueStore`] elsewhere.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use party_core::{PartyId, PendingIntent, Route};

use crate::error::{PaymentError, Result};

/// Key of the single pending-intent slot
pub const PENDING_INTENT_KEY: &str = "pendingPayment";

/// Route to resume after billing-credential registration
pub const AFTER_BILLING_REDIRECT_KEY: &str = "afterBillingRedirect";

/// Why billing-credential registration was triggered
pub const BILLING_REGISTRATION_REASON_KEY: &str = "billingRegistrationReason";

/// Registration reason written after a member joins a party
pub const PARTY_JOIN_REASON: &str = "party_join";

/// String key-value storage trait
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory key-value store (for tests and native hosts)
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> PaymentError {
    PaymentError::Storage("memory store lock poisoned".into())
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Single-slot persistence of the [`PendingIntent`]
#[derive(Debug)]
pub struct IntentStore<S> {
    store: S,
}

impl<S: KeyValueStore> IntentStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying medium, shared with the billing hand-off flags
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Write the intent, replacing whatever occupied the slot
    pub fn save(&self, intent: &PendingIntent) -> Result<()> {
        let encoded = serde_json::to_string(intent)?;
        self.store.set(PENDING_INTENT_KEY, &encoded)
    }

    /// Read the intent.
    ///
    /// An empty slot, an unreadable medium, an undecodable value and a record
    /// missing the ids it needs all come back as `None`.
    pub fn load(&self) -> Option<PendingIntent> {
        let raw = match self.store.get(PENDING_INTENT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Pending intent slot unreadable");
                return None;
            }
        };

        let intent: PendingIntent = match serde_json::from_str(&raw) {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable pending intent");
                return None;
            }
        };

        if !intent.is_well_formed() {
            tracing::warn!(intent_type = %intent.intent_type, "Pending intent lacks a party reference");
            return None;
        }

        if let Some(age) = intent.age(Utc::now()) {
            tracing::debug!(
                intent_type = %intent.intent_type,
                age_secs = age.num_seconds(),
                "Loaded pending intent"
            );
        }

        Some(intent)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(PENDING_INTENT_KEY)
    }
}

/// Flags telling the billing-registration screen where to go afterwards
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillingHandoff {
    pub after_billing_redirect: String,
    pub reason: String,
}

impl BillingHandoff {
    /// Hand-off written after a successful party join
    pub fn party_join(party_id: PartyId) -> Self {
        Self {
            after_billing_redirect: Route::PartyDetail(party_id).path(),
            reason: PARTY_JOIN_REASON.to_string(),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.set(AFTER_BILLING_REDIRECT_KEY, &self.after_billing_redirect)?;
        store.set(BILLING_REGISTRATION_REASON_KEY, &self.reason)
    }

    /// Read both flags; `None` unless both are present
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>> {
        let redirect = store.get(AFTER_BILLING_REDIRECT_KEY)?;
        let reason = store.get(BILLING_REGISTRATION_REASON_KEY)?;

        Ok(redirect.zip(reason).map(|(after_billing_redirect, reason)| Self {
            after_billing_redirect,
            reason,
        }))
    }

    /// Read both flags and remove them
    pub fn take<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>> {
        let handoff = Self::load(store)?;
        store.remove(AFTER_BILLING_REDIRECT_KEY)?;
        store.remove(BILLING_REGISTRATION_REASON_KEY)?;
        Ok(handoff)
    }
}
