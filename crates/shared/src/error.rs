use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error object reported by the remote service, e.g.
/// `{"error":{"code":"InputValidationFailed","message":"..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    /// Request kind the error answers, copied from the envelope's `msg_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            msg_type: None,
        }
    }

    pub fn with_msg_type(mut self, msg_type: impl Into<String>) -> Self {
        self.msg_type = Some(msg_type.into());
        self
    }

    /// True when the error does not name a request kind, or names `kind`.
    pub fn answers(&self, kind: &str) -> bool {
        self.msg_type.as_deref().map_or(true, |msg_type| msg_type == kind)
    }
}

#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiException {
    pub code: String,
    pub message: String,
}

impl From<ApiError> for ApiException {
    fn from(value: ApiError) -> Self {
        Self {
            code: value.code,
            message: value.message,
        }
    }
}
