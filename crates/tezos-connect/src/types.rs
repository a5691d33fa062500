//! Host request and response types

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigUint, Sign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Invalid decimal integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid integer `{0}`")]
pub struct ParseBigIntError(String);

/// Arbitrary precision signed integer
///
/// The host sends nonces, gas values and amounts either as JSON numbers or as
/// decimal strings, so values outside the `i64` range must survive a round
/// trip unchanged. Serialized as a decimal string.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInt(num_bigint::BigInt);

impl BigInt {
    /// Zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Absolute value
    pub fn magnitude(&self) -> &BigUint {
        self.0.magnitude()
    }

    /// Value as `u64` when it is non-negative and fits
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(&self.0).ok()
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({})", self.0)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // num-bigint also accepts `_` separators, Micheline and the host do not
        let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBigIntError(s.to_string()));
        }

        num_bigint::BigInt::from_str(s)
            .map(Self)
            .map_err(|_| ParseBigIntError(s.to_string()))
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl Serialize for BigInt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // serde_json keeps the literal text of numbers (`arbitrary_precision`)
        let text = match Value::deserialize(deserializer)? {
            Value::Number(number) => number.to_string(),
            Value::String(text) => text,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected an integer or a decimal string, found `{}`",
                    other
                )))
            }
        };

        BigInt::from_str(&text).map_err(serde::de::Error::custom)
    }
}

/// Error classification returned to the host alongside a failed preparation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    /// The request or the account state it refers to cannot be turned into an operation
    InvalidInputs,
}

/// Transaction prepare request
///
/// `params` holds the raw JSON text of each call argument, `None` for JSON
/// `null` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPrepareRequest {
    /// Source (signer) address
    pub from: String,
    /// Destination address
    pub to: String,
    /// Nonce proposed by the host, overridden when stale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<BigInt>,
    /// Gas value, echoed back in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<BigInt>,
    /// Amount in mutez
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<BigInt>,
    /// Call arguments
    #[serde(default, with = "raw_json_params")]
    pub params: Vec<Option<String>>,
}

/// Transaction prepare response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPrepareResponse {
    /// Gas value from the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<BigInt>,
    /// Hex encoded unsigned operation bytes
    pub transaction_data: String,
}

/// Call arguments travel as arbitrary JSON values and are kept as JSON text
mod raw_json_params {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(params: &[Option<String>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let values: Vec<Value> = params
            .iter()
            .map(|param| match param {
                Some(text) => serde_json::from_str(text).unwrap_or(Value::String(text.clone())),
                None => Value::Null,
            })
            .collect();
        values.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values: Vec<Value> = Vec::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .map(|value| match value {
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigint_parse_canonical() {
        let value = BigInt::from_str("000123").expect("valid");
        assert_eq!(value.to_string(), "123");
        assert_eq!(value.to_u64(), Some(123));

        let negative = BigInt::from_str("-42").expect("valid");
        assert!(negative.is_negative());
        assert_eq!(negative.to_u64(), None);

        let zero = BigInt::from_str("-000").expect("valid");
        assert_eq!(zero, BigInt::zero());
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_bigint_rejects_garbage() {
        assert!(BigInt::from_str("").is_err());
        assert!(BigInt::from_str("-").is_err());
        assert!(BigInt::from_str("12a").is_err());
        assert!(BigInt::from_str("1.5").is_err());
        assert!(BigInt::from_str("1_000").is_err());
    }

    #[test]
    fn test_bigint_beyond_i64() {
        let value = BigInt::from_str("123456789012345678901234567890").expect("valid");
        assert_eq!(value.to_u64(), None);
        assert_eq!(value.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_bigint_deserialize_number_and_string() {
        let from_number: BigInt = serde_json::from_str("42").expect("number");
        let from_string: BigInt = serde_json::from_str("\"42\"").expect("string");
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).expect("serialize"), "\"42\"");
    }

    #[test]
    fn test_bigint_deserialize_number_beyond_u64() {
        let value: BigInt = serde_json::from_str("18446744073709551616").expect("number");
        assert_eq!(value.to_string(), "18446744073709551616");
        assert_eq!(value.to_u64(), None);

        let negative: BigInt = serde_json::from_str("-98765432109876543210").expect("number");
        assert!(negative.is_negative());
    }

    #[test]
    fn test_bigint_rejects_fractions_and_other_json() {
        assert!(serde_json::from_str::<BigInt>("1.5").is_err());
        assert!(serde_json::from_str::<BigInt>("1e3").is_err());
        assert!(serde_json::from_str::<BigInt>("true").is_err());
        assert!(serde_json::from_str::<BigInt>("null").is_err());
    }

    #[test]
    fn test_request_with_nonce_beyond_u64() {
        let json = r#"{
            "from": "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb",
            "to": "KT1PWx2mnDueood7fEmfbBDKx1D9BAnnXitn",
            "nonce": 18446744073709551616,
            "gas": 340282366920938463463374607431768211456,
            "value": "1000"
        }"#;

        let request: TransactionPrepareRequest = serde_json::from_str(json).expect("valid request");
        assert_eq!(
            request.nonce,
            Some(BigInt::from_str("18446744073709551616").expect("valid"))
        );
        assert_eq!(
            request.gas.as_ref().map(ToString::to_string).as_deref(),
            Some("340282366920938463463374607431768211456")
        );
    }

    #[test]
    fn test_request_params_keep_json_text() {
        let json = r#"{
            "from": "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb",
            "to": "KT1PWx2mnDueood7fEmfbBDKx1D9BAnnXitn",
            "nonce": 7,
            "gas": "10000",
            "params": [{"entrypoint": "mint", "value": {"int": "1"}}, null]
        }"#;

        let request: TransactionPrepareRequest = serde_json::from_str(json).expect("valid request");
        assert_eq!(request.params.len(), 2);
        assert!(request.params[1].is_none());

        let first: serde_json::Value =
            serde_json::from_str(request.params[0].as_deref().expect("present")).expect("json");
        assert_eq!(first["entrypoint"], "mint");
        assert_eq!(request.nonce, Some(BigInt::from(7u64)));
        assert_eq!(request.value, None);
    }

    #[test]
    fn test_response_field_names() {
        let response = TransactionPrepareResponse {
            gas: Some(BigInt::from(100u64)),
            transaction_data: "00ff".to_string(),
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["transactionData"], "00ff");
        assert_eq!(value["gas"], "100");
    }

    #[test]
    fn test_error_reason_serialization() {
        let json = serde_json::to_string(&ErrorReason::InvalidInputs).expect("serialize");
        assert_eq!(json, "\"invalid_inputs\"");
    }
}
