//! HTTP Handlers
//!
//! Stand-in party backend speaking the wire format the front end's
//! `HttpPartyServiceClient` expects.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use party_core::{PartyId, PaymentConfirmation};
use party_payments::{ApiErrorBody, CreatePartyResponse, ServiceError};
use serde::Serialize;

use crate::state::{AppState, LedgerError, PartyRecord};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub parties: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponse {
    pub party_id: PartyId,
    pub order_id: String,
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::PartyNotFound(_) => (StatusCode::NOT_FOUND, ServiceError::PARTY_NOT_FOUND_CODE),
            Self::AlreadyProcessed(_) => (StatusCode::CONFLICT, ServiceError::ALREADY_PROCESSED_CODE),
            Self::InvalidPayment(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYMENT"),
        };
        (status, Json(ApiErrorBody::new(code, self.to_string()))).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        parties: state.ledger.party_count().await,
    })
}

/// Create a party from an opaque creation request
pub async fn create_party(
    State(state): State<AppState>,
    Json(request): Json<serde_json::Value>,
) -> (StatusCode, Json<CreatePartyResponse>) {
    let party_id = state.ledger.create(request).await;
    tracing::info!(%party_id, "Party created");
    (StatusCode::CREATED, Json(CreatePartyResponse { party_id }))
}

pub async fn get_party(
    State(state): State<AppState>,
    Path(party_id): Path<i64>,
) -> Result<Json<PartyRecord>, LedgerError> {
    let party_id = PartyId::new(party_id);
    state
        .ledger
        .get(party_id)
        .await
        .map(Json)
        .ok_or(LedgerError::PartyNotFound(party_id))
}

/// Remove a party, reproducing a party lost between payment start and return
pub async fn delete_party(
    State(state): State<AppState>,
    Path(party_id): Path<i64>,
) -> Result<StatusCode, LedgerError> {
    let party_id = PartyId::new(party_id);
    if state.ledger.remove(party_id).await {
        tracing::info!(%party_id, "Party removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(LedgerError::PartyNotFound(party_id))
    }
}

pub async fn confirm_leader_deposit(
    State(state): State<AppState>,
    Path(party_id): Path<i64>,
    Json(payment): Json<PaymentConfirmation>,
) -> Result<Json<SettlementResponse>, LedgerError> {
    let party_id = PartyId::new(party_id);
    let result = state.ledger.settle_deposit(party_id, &payment).await;
    settled(party_id, payment, result, "Leader deposit")
}

pub async fn confirm_join(
    State(state): State<AppState>,
    Path(party_id): Path<i64>,
    Json(payment): Json<PaymentConfirmation>,
) -> Result<Json<SettlementResponse>, LedgerError> {
    let party_id = PartyId::new(party_id);
    let result = state.ledger.settle_join(party_id, &payment).await;
    settled(party_id, payment, result, "Join payment")
}

fn settled(
    party_id: PartyId,
    payment: PaymentConfirmation,
    result: Result<(), LedgerError>,
    what: &str,
) -> Result<Json<SettlementResponse>, LedgerError> {
    match result {
        Ok(()) => {
            tracing::info!(%party_id, order_id = %payment.order_id, amount = payment.amount, "{what} settled");
            Ok(Json(SettlementResponse {
                party_id,
                order_id: payment.order_id,
            }))
        }
        Err(e) => {
            tracing::warn!(%party_id, order_id = %payment.order_id, error = %e, "{what} rejected");
            Err(e)
        }
    }
}
