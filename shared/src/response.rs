//! API Response types
//!
//! Envelope returned by every billing backend operation:
//!
//! ```json
//! {
//!     "success": true,
//!     "message": "Printed",
//!     "data": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was applied by the backend
    pub success: bool,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message (optional, usually set on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Create a successful response without data
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// The backend message, or `fallback` when none was supplied
    pub fn message_or(&self, fallback: &str) -> String {
        match &self.message {
            Some(m) if !m.is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let resp: ApiResponse<i32> = serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, Some(7));
        assert_eq!(resp.message, None);
    }

    #[test]
    fn test_message_or_fallback() {
        let resp = ApiResponse::<()>::error("kitchen offline");
        assert_eq!(resp.message_or("request failed"), "kitchen offline");

        let silent = ApiResponse::<()> {
            success: false,
            data: None,
            message: None,
        };
        assert_eq!(silent.message_or("request failed"), "request failed");
    }
}
