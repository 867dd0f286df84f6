//! Party Backend Client
//!
//! The three backend operations the payment-completion flow needs, behind a
//! trait so the orchestrator can run against the real REST API or a fake.

use std::rc::Rc;

use async_trait::async_trait;
use party_core::{CreatePartyRequest, PartyId, PaymentConfirmation};
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::{Result, ServiceError, ServiceResult};

/// Party backend operations (Strategy pattern).
///
/// Futures are not `Send`: the flow runs on the browser's single event loop.
#[async_trait(?Send)]
pub trait PartyServiceClient {
    /// Create a party, returning its id
    async fn create_party(&self, payload: &CreatePartyRequest) -> ServiceResult<PartyId>;

    /// Settle the leader's deposit for a party
    async fn confirm_leader_deposit(
        &self,
        party_id: PartyId,
        confirmation: &PaymentConfirmation,
    ) -> ServiceResult<()>;

    /// Settle a member's join payment
    async fn confirm_join(
        &self,
        party_id: PartyId,
        confirmation: &PaymentConfirmation,
    ) -> ServiceResult<()>;
}

#[async_trait(?Send)]
impl<C: PartyServiceClient + ?Sized> PartyServiceClient for Rc<C> {
    async fn create_party(&self, payload: &CreatePartyRequest) -> ServiceResult<PartyId> {
        (**self).create_party(payload).await
    }

    async fn confirm_leader_deposit(
        &self,
        party_id: PartyId,
        confirmation: &PaymentConfirmation,
    ) -> ServiceResult<()> {
        (**self).confirm_leader_deposit(party_id, confirmation).await
    }

    async fn confirm_join(
        &self,
        party_id: PartyId,
        confirmation: &PaymentConfirmation,
    ) -> ServiceResult<()> {
        (**self).confirm_join(party_id, confirmation).await
    }
}

/// Response body of a successful party creation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyResponse {
    pub party_id: PartyId,
}

/// API path for party creation
pub const PARTIES_PATH: &str = "/api/parties";

/// API path for a party's leader deposit
pub fn leader_deposit_path(party_id: PartyId) -> String {
    format!("/api/parties/{party_id}/leader-deposit")
}

/// API path for joining a party
pub fn join_path(party_id: PartyId) -> String {
    format!("/api/parties/{party_id}/join")
}

/// REST implementation over reqwest
pub struct HttpPartyServiceClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpPartyServiceClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ServiceResult<reqwest::Response> {
        let mut request = self.http.post(self.config.endpoint(path)).json(body);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ServiceError::classify(status.as_u16(), &body);
        tracing::debug!(path, status = status.as_u16(), error = %error, "Party API call rejected");
        Err(error)
    }
}

#[async_trait(?Send)]
impl PartyServiceClient for HttpPartyServiceClient {
    async fn create_party(&self, payload: &CreatePartyRequest) -> ServiceResult<PartyId> {
        let response = self.post(PARTIES_PATH, payload).await?;
        let created: CreatePartyResponse = response.json().await?;
        Ok(created.party_id)
    }

    async fn confirm_leader_deposit(
        &self,
        party_id: PartyId,
        confirmation: &PaymentConfirmation,
    ) -> ServiceResult<()> {
        self.post(&leader_deposit_path(party_id), confirmation).await?;
        Ok(())
    }

    async fn confirm_join(
        &self,
        party_id: PartyId,
        confirmation: &PaymentConfirmation,
    ) -> ServiceResult<()> {
        self.post(&join_path(party_id), confirmation).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let id = PartyId::new(7);
        assert_eq!(leader_deposit_path(id), "/api/parties/7/leader-deposit");
        assert_eq!(join_path(id), "/api/parties/7/join");
    }

    #[test]
    fn test_create_response_shape() {
        let created: CreatePartyResponse = serde_json::from_str(r#"{"partyId":99}"#).unwrap();
        assert_eq!(created.party_id, PartyId::new(99));
    }
}
