//! Navigation targets produced by the payment-completion flow

use crate::intent::PartyId;

/// Wizard step the creation flow resumes at after the leader deposit
pub const CREATE_FLOW_RESUME_STEP: u8 = 4;

/// Screen to navigate to once reconciliation finishes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Home screen, also the landing point for failures
    Home,

    /// Party-creation wizard, resumed at `step` for `party_id`
    CreateParty { step: u8, party_id: PartyId },

    /// Recurring-payment credential registration
    BillingRegistration,

    /// Party detail screen
    PartyDetail(PartyId),
}

impl Route {
    /// Creation wizard continuation after a settled leader deposit
    pub const fn create_flow_continuation(party_id: PartyId) -> Self {
        Self::CreateParty {
            step: CREATE_FLOW_RESUME_STEP,
            party_id,
        }
    }

    /// Path (with query) understood by the front-end router
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::CreateParty { step, party_id } => {
                format!("/party/create?step={step}&partyId={party_id}")
            }
            Self::BillingRegistration => "/payment/billing/register".to_string(),
            Self::PartyDetail(party_id) => format!("/party/{party_id}"),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(
            Route::create_flow_continuation(PartyId::new(99)).path(),
            "/party/create?step=4&partyId=99"
        );
        assert_eq!(Route::BillingRegistration.path(), "/payment/billing/register");
        assert_eq!(Route::PartyDetail(PartyId::new(42)).to_string(), "/party/42");
    }
}
