//! The response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used when a failed response carries neither `msg` nor `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// The `{status, data, msg, message}` shape every API response follows.
///
/// Success is decided by the HTTP status of the response, not by the
/// `status` field of the body. The field is kept for inspection only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// HTTP-like status code echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Resource payload, absent on message-only responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Short server message (preferred over `message`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Long-form server message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Returns the server-supplied notice, `msg` first.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        non_empty(self.msg.as_deref()).or_else(|| non_empty(self.message.as_deref()))
    }

    /// Consumes the envelope and returns its payload, if any.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Extracts the user-facing message from a failed response body.
///
/// `msg` wins over `message`; empty or non-string values are skipped and the
/// [`FALLBACK_ERROR_MESSAGE`] is used when neither is usable.
#[must_use]
pub fn failure_message(body: &Value) -> String {
    ["msg", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn msg_is_preferred_over_message() {
        let body = json!({ "status": 400, "msg": "X", "message": "Y" });
        assert_eq!(failure_message(&body), "X");
    }

    #[test]
    fn message_is_used_when_msg_missing() {
        let body = json!({ "status": 404, "message": "Car not found" });
        assert_eq!(failure_message(&body), "Car not found");
    }

    #[test]
    fn fallback_when_neither_present() {
        assert_eq!(failure_message(&json!({ "status": 500 })), FALLBACK_ERROR_MESSAGE);
        assert_eq!(failure_message(&json!([1, 2, 3])), FALLBACK_ERROR_MESSAGE);
        assert_eq!(failure_message(&json!({ "msg": "" })), FALLBACK_ERROR_MESSAGE);
        assert_eq!(failure_message(&json!({ "msg": 12 })), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn envelope_notice_and_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status": 200, "data": [1, 2], "message": "ok"}"#).unwrap();
        assert_eq!(envelope.notice(), Some("ok"));
        assert_eq!(envelope.status, Some(json!(200)));
        assert_eq!(envelope.into_data(), Some(vec![1, 2]));
    }

    #[test]
    fn envelope_without_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status": 200, "msg": "deleted"}"#).unwrap();
        assert_eq!(envelope.notice(), Some("deleted"));
        assert!(envelope.into_data().is_none());
    }
}
