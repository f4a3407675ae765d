//! Uniform response envelope.
//!
//! Every API response — collection, single item, acknowledgement, or failure —
//! is wrapped in the same shape, so clients parse one schema:
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Request completed successfully",
//!   "data": …,
//!   "timestamp": "2024-01-15T09:30:00Z",
//!   "totalCount": 8
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default message on successful responses.
const DEFAULT_OK_MESSAGE: &str = "Request completed successfully";

/// Response wrapper carrying status, message, payload, and metadata.
///
/// `total_count` reflects the payload's cardinality: the collection length
/// for lists, `1` for single items, `0` when there is no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
    pub total_count: usize,
}

impl<T> Envelope<T> {
    /// A successful single-item envelope (`totalCount` = 1).
    pub fn item(data: T) -> Self {
        Self {
            success: true,
            message: DEFAULT_OK_MESSAGE.to_string(),
            data: Some(data),
            timestamp: Utc::now(),
            total_count: 1,
        }
    }

    /// A failure envelope with no payload (`totalCount` = 0).
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
            total_count: 0,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// A successful collection envelope; `totalCount` is the collection length.
    pub fn collection(data: Vec<T>) -> Self {
        let total_count = data.len();
        Self {
            success: true,
            message: DEFAULT_OK_MESSAGE.to_string(),
            data: Some(data),
            timestamp: Utc::now(),
            total_count,
        }
    }
}

impl Envelope<()> {
    /// A payload-free success acknowledgement (`totalCount` = 0).
    pub fn ack(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
            total_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_value<T: Serialize>(envelope: &Envelope<T>) -> serde_json::Value {
        serde_json::to_value(envelope).unwrap()
    }

    #[test]
    fn collection_envelope_counts_elements() {
        let env = Envelope::collection(vec![1, 2, 3]);
        let value = as_value(&env);
        assert_eq!(value["success"], true);
        assert_eq!(value["totalCount"], 3);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn empty_collection_has_zero_count() {
        let env = Envelope::collection(Vec::<u32>::new());
        let value = as_value(&env);
        assert_eq!(value["totalCount"], 0);
        assert_eq!(value["data"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn item_envelope_has_count_one() {
        let env = Envelope::item("thing");
        let value = as_value(&env);
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Request completed successfully");
        assert_eq!(value["totalCount"], 1);
        assert_eq!(value["data"], "thing");
    }

    #[test]
    fn failure_envelope_carries_message_and_no_data() {
        let env = Envelope::<u32>::failure("Product with id 999 not found");
        let value = as_value(&env);
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Product with id 999 not found");
        assert!(value["data"].is_null());
        assert_eq!(value["totalCount"], 0);
    }

    #[test]
    fn ack_envelope_is_successful_and_empty() {
        let env = Envelope::ack("Product cache cleared");
        let value = as_value(&env);
        assert_eq!(value["success"], true);
        assert!(value["data"].is_null());
        assert_eq!(value["totalCount"], 0);
    }

    #[test]
    fn all_envelope_fields_present_in_wire_form() {
        let value = as_value(&Envelope::<u32>::failure("nope"));
        for key in ["success", "message", "data", "timestamp", "totalCount"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
