//! Gateway Callback
//!
//! Parses the parameters the payment gateway appends to the return URL:
//! `?paymentKey=...&orderId=...&amount=...`.

use serde::{Deserialize, Serialize};

use crate::error::{CallbackError, Result};

const PAYMENT_KEY: &str = "paymentKey";
const ORDER_ID: &str = "orderId";
const AMOUNT: &str = "amount";

/// Validated gateway redirect parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayCallback {
    pub payment_key: String,
    pub order_id: String,
    /// Minor currency unit, always > 0
    pub amount: u64,
}

impl GatewayCallback {
    /// Parse a raw query string, with or without the leading `?`
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Parse decoded key/value pairs. The first occurrence of a key wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut payment_key = None;
        let mut order_id = None;
        let mut amount = None;

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                PAYMENT_KEY => &mut payment_key,
                ORDER_ID => &mut order_id,
                AMOUNT => &mut amount,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }

        Ok(Self {
            payment_key: required(PAYMENT_KEY, payment_key)?,
            order_id: required(ORDER_ID, order_id)?,
            amount: parse_amount(&required(AMOUNT, amount)?)?,
        })
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String> {
    let value = value.ok_or(CallbackError::MissingParam(name))?;
    if value.trim().is_empty() {
        return Err(CallbackError::EmptyParam(name));
    }
    Ok(value)
}

fn parse_amount(raw: &str) -> Result<u64> {
    match raw.parse::<u64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(CallbackError::InvalidAmount(raw.to_string())),
    }
}

/// Body sent to the backend to settle a gateway payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub gateway_key: String,
    pub order_id: String,
    pub amount: u64,
    pub payment_method: String,
}

impl PaymentConfirmation {
    /// Payment-method tag sent with every confirmation
    pub const PAYMENT_METHOD: &'static str = "CARD";
}

impl From<&GatewayCallback> for PaymentConfirmation {
    fn from(callback: &GatewayCallback) -> Self {
        Self {
            gateway_key: callback.payment_key.clone(),
            order_id: callback.order_id.clone(),
            amount: callback.amount,
            payment_method: Self::PAYMENT_METHOD.to_string(),
        }
    }
}
