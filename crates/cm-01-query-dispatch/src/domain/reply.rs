//! # Service Replies
//!
//! Truthiness of raw bodies and the typed view of the service's reply
//! envelope `{ "status": "ok", "data": ... }`.

use crate::domain::errors::DispatchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a response body counts as present and valid.
///
/// `null`, `false`, `0` and `""` are falsy. Arrays and objects are truthy
/// even when empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reply envelope of the data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceReply {
    /// `"ok"` on success.
    #[serde(default)]
    pub status: String,
    /// Result payload.
    #[serde(default)]
    pub data: Option<Value>,
    /// Error message, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceReply {
    /// Parse a raw body.
    pub fn from_value(value: Value) -> Result<Self, DispatchError> {
        serde_json::from_value(value).map_err(|e| DispatchError::Decode(e.to_string()))
    }

    /// True when the service reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Decode `data` into `T`. A missing `data` decodes like `null`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, DispatchError> {
        if !self.is_ok() {
            let reason = self
                .error
                .unwrap_or_else(|| format!("service reported status '{}'", self.status));
            return Err(DispatchError::Decode(reason));
        }
        serde_json::from_value(self.data.unwrap_or(Value::Null))
            .map_err(|e| DispatchError::Decode(e.to_string()))
    }
}

/// Body of the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// `"ok"` when the service is up.
    pub status: String,
}

impl ServiceStatus {
    /// True when the service reported `ok`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        user_id: u64,
        user_name: String,
    }

    #[test]
    fn test_decode_data() {
        let reply = ServiceReply::from_value(json!({
            "status": "ok",
            "data": [{ "user_id": 1, "user_name": "jmbski" }]
        }))
        .unwrap();
        assert!(reply.is_ok());

        let users: Vec<User> = reply.into_data().unwrap();
        assert_eq!(
            users,
            vec![User {
                user_id: 1,
                user_name: "jmbski".to_string()
            }]
        );
    }

    #[test]
    fn test_null_data_decodes_to_none() {
        let reply = ServiceReply::from_value(json!({ "status": "ok", "data": null })).unwrap();
        let user: Option<User> = reply.into_data().unwrap();
        assert_eq!(user, None);
    }

    #[test]
    fn test_non_ok_status_is_decode_error() {
        let reply = ServiceReply::from_value(json!({ "status": "error", "error": "boom" })).unwrap();
        assert_eq!(
            reply.into_data::<Value>(),
            Err(DispatchError::Decode("boom".to_string()))
        );
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let reply = ServiceReply::from_value(json!({ "status": "ok", "data": 5 })).unwrap();
        assert!(matches!(
            reply.into_data::<Vec<User>>(),
            Err(DispatchError::Decode(_))
        ));
    }

    #[test]
    fn test_status_body() {
        let status: ServiceStatus = serde_json::from_value(json!({ "status": "ok" })).unwrap();
        assert!(status.is_ok());
    }
}
