//! Pending Intent
//!
//! The record, written before the gateway redirect, of what the payment is for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend party identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(i64);

impl PartyId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for PartyId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the redirected payment was meant to accomplish
///
/// Stored as `"CREATE_PARTY"` / `"JOIN_PARTY"`. Any other string survives
/// decoding as [`IntentType::Unknown`] so a corrupt record is reported as such
/// instead of looking like an empty slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentType {
    CreateParty,
    JoinParty,
    Unknown(String),
}

impl IntentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreateParty => "CREATE_PARTY",
            Self::JoinParty => "JOIN_PARTY",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for IntentType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CREATE_PARTY" => Self::CreateParty,
            "JOIN_PARTY" => Self::JoinParty,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<IntentType> for String {
    fn from(intent_type: IntentType) -> Self {
        match intent_type {
            IntentType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for IntentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Party-creation request body, forwarded verbatim when a lost party is re-created
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatePartyRequest(serde_json::Value);

impl CreatePartyRequest {
    pub const fn new(body: serde_json::Value) -> Self {
        Self(body)
    }

    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// The single persisted record of an in-flight payment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingIntent {
    pub intent_type: IntentType,

    /// Always set for joins; for creation, set once the party exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<PartyId>,

    /// Used only to re-create a party that disappeared server-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_payload: Option<CreatePartyRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PendingIntent {
    /// Intent for a leader deposit on a party being created
    pub fn create_party(party_id: Option<PartyId>, creation_payload: Option<CreatePartyRequest>) -> Self {
        Self {
            intent_type: IntentType::CreateParty,
            party_id,
            creation_payload,
            created_at: Some(Utc::now()),
        }
    }

    /// Intent for a member joining an existing party
    pub fn join_party(party_id: PartyId) -> Self {
        Self {
            intent_type: IntentType::JoinParty,
            party_id: Some(party_id),
            creation_payload: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Whether the record carries enough to act on.
    ///
    /// A join needs its party; a creation needs either the party or the payload
    /// to re-create it. Unknown types are left for the orchestrator to report.
    pub fn is_well_formed(&self) -> bool {
        match self.intent_type {
            IntentType::JoinParty => self.party_id.is_some(),
            IntentType::CreateParty => {
                self.party_id.is_some() || self.creation_payload.is_some()
            }
            IntentType::Unknown(_) => true,
        }
    }

    /// Time since the intent was written, if it was stamped
    pub fn age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.created_at.map(|created| now - created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_wire_format() {
        let intent = PendingIntent {
            intent_type: IntentType::JoinParty,
            party_id: Some(PartyId::new(42)),
            creation_payload: None,
            created_at: None,
        };

        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json, serde_json::json!({ "intentType": "JOIN_PARTY", "partyId": 42 }));
    }

    #[test]
    fn test_unknown_intent_type_survives_decoding() {
        let intent: PendingIntent =
            serde_json::from_str(r#"{"intentType":"REFUND_PARTY","partyId":3}"#).unwrap();

        assert_eq!(intent.intent_type, IntentType::Unknown("REFUND_PARTY".into()));
        assert!(intent.is_well_formed());
    }

    #[test]
    fn test_creation_payload_is_kept_verbatim() {
        let raw = r#"{"intentType":"CREATE_PARTY","partyId":7,"creationPayload":{"productId":1,"maxMembers":4}}"#;
        let intent: PendingIntent = serde_json::from_str(raw).unwrap();

        let payload = intent.creation_payload.unwrap();
        assert_eq!(payload.as_value()["maxMembers"], 4);
    }

    #[test]
    fn test_well_formedness() {
        let mut join = PendingIntent::join_party(PartyId::new(1));
        assert!(join.is_well_formed());
        join.party_id = None;
        assert!(!join.is_well_formed());

        assert!(!PendingIntent::create_party(None, None).is_well_formed());
        assert!(
            PendingIntent::create_party(None, Some(CreatePartyRequest::new(serde_json::json!({}))))
                .is_well_formed()
        );
    }
}
