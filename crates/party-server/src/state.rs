//! Application State
//!
//! In-memory party ledger standing in for the real backend. Settled orders are
//! remembered by `orderId`, so a repeated confirmation is answered with
//! "already processed" and changes nothing.

use std::collections::HashMap;
use std::sync::Arc;

use party_core::{PartyId, PaymentConfirmation};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub ledger: Arc<PartyLedger>,
}

/// What a settled order paid for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    LeaderDeposit(PartyId),
    Join(PartyId),
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRecord {
    #[serde(rename = "partyId")]
    pub id: PartyId,
    pub request: serde_json::Value,
    pub deposit_order: Option<String>,
    pub member_orders: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Party {0} not found")]
    PartyNotFound(PartyId),

    #[error("Order {0} already processed")]
    AlreadyProcessed(String),

    #[error("Invalid payment: {0}")]
    InvalidPayment(&'static str),
}

#[derive(Default)]
struct Ledger {
    last_id: i64,
    parties: HashMap<PartyId, PartyRecord>,
    settled: HashMap<String, Settlement>,
}

#[derive(Default)]
pub struct PartyLedger {
    inner: RwLock<Ledger>,
}

impl PartyLedger {
    pub async fn create(&self, request: serde_json::Value) -> PartyId {
        let mut ledger = self.inner.write().await;
        ledger.last_id += 1;
        let id = PartyId::new(ledger.last_id);
        ledger.parties.insert(
            id,
            PartyRecord {
                id,
                request,
                deposit_order: None,
                member_orders: Vec::new(),
            },
        );
        id
    }

    /// Drop a party, as if it expired server-side
    pub async fn remove(&self, id: PartyId) -> bool {
        self.inner.write().await.parties.remove(&id).is_some()
    }

    pub async fn get(&self, id: PartyId) -> Option<PartyRecord> {
        self.inner.read().await.parties.get(&id).cloned()
    }

    pub async fn party_count(&self) -> usize {
        self.inner.read().await.parties.len()
    }

    pub async fn settlement(&self, order_id: &str) -> Option<Settlement> {
        self.inner.read().await.settled.get(order_id).cloned()
    }

    pub async fn settle_deposit(
        &self,
        id: PartyId,
        payment: &PaymentConfirmation,
    ) -> Result<(), LedgerError> {
        self.settle(id, payment, Settlement::LeaderDeposit(id)).await
    }

    pub async fn settle_join(
        &self,
        id: PartyId,
        payment: &PaymentConfirmation,
    ) -> Result<(), LedgerError> {
        self.settle(id, payment, Settlement::Join(id)).await
    }

    async fn settle(
        &self,
        id: PartyId,
        payment: &PaymentConfirmation,
        settlement: Settlement,
    ) -> Result<(), LedgerError> {
        validate(payment)?;

        let mut ledger = self.inner.write().await;
        if ledger.settled.contains_key(&payment.order_id) {
            return Err(LedgerError::AlreadyProcessed(payment.order_id.clone()));
        }

        let party = ledger
            .parties
            .get_mut(&id)
            .ok_or(LedgerError::PartyNotFound(id))?;
        match settlement {
            Settlement::LeaderDeposit(_) => party.deposit_order = Some(payment.order_id.clone()),
            Settlement::Join(_) => party.member_orders.push(payment.order_id.clone()),
        }
        ledger.settled.insert(payment.order_id.clone(), settlement);
        Ok(())
    }
}

fn validate(payment: &PaymentConfirmation) -> Result<(), LedgerError> {
    if payment.amount == 0 {
        return Err(LedgerError::InvalidPayment("amount must be positive"));
    }
    if payment.gateway_key.is_empty() || payment.order_id.is_empty() {
        return Err(LedgerError::InvalidPayment("gateway key and order id are required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(order_id: &str) -> PaymentConfirmation {
        PaymentConfirmation {
            gateway_key: "pk".into(),
            order_id: order_id.into(),
            amount: 5000,
            payment_method: PaymentConfirmation::PAYMENT_METHOD.into(),
        }
    }

    #[tokio::test]
    async fn test_order_settles_once() {
        let ledger = PartyLedger::default();
        let id = ledger.create(serde_json::json!({})).await;

        ledger.settle_deposit(id, &payment("o1")).await.unwrap();
        assert_eq!(
            ledger.settle_deposit(id, &payment("o1")).await,
            Err(LedgerError::AlreadyProcessed("o1".into()))
        );
        assert_eq!(ledger.get(id).await.unwrap().deposit_order.as_deref(), Some("o1"));
    }

    #[tokio::test]
    async fn test_settled_order_reported_after_party_removed() {
        let ledger = PartyLedger::default();
        let id = ledger.create(serde_json::json!({})).await;
        ledger.settle_join(id, &payment("o1")).await.unwrap();
        assert!(ledger.remove(id).await);

        assert_eq!(
            ledger.settle_join(id, &payment("o1")).await,
            Err(LedgerError::AlreadyProcessed("o1".into()))
        );
        assert_eq!(
            ledger.settle_join(id, &payment("o2")).await,
            Err(LedgerError::PartyNotFound(id))
        );
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let ledger = PartyLedger::default();
        let id = ledger.create(serde_json::json!({})).await;
        let mut zero = payment("o1");
        zero.amount = 0;

        assert!(matches!(
            ledger.settle_deposit(id, &zero).await,
            Err(LedgerError::InvalidPayment(_))
        ));
        assert!(ledger.settlement("o1").await.is_none());
    }
}
