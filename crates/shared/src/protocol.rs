use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    domain::{PaymentMethodEntry, ResidenceItem},
    error::ApiError,
};

/// Outbound requests. The remote service keys its responses by the same field
/// name the request carries, so `{"residence_list":1}` is answered by a message
/// with a top-level `residence_list` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    ResidenceList,
    PaymentMethods { residence: String },
}

impl ClientRequest {
    pub fn payment_methods(residence: impl Into<String>) -> Self {
        Self::PaymentMethods {
            residence: residence.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ResidenceList => "residence_list",
            Self::PaymentMethods { .. } => "payment_methods",
        }
    }
}

impl Serialize for ClientRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ResidenceList => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("residence_list", &1)?;
                map.end()
            }
            Self::PaymentMethods { residence } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("payment_methods", &1)?;
                map.serialize_entry("residence", residence)?;
                map.end()
            }
        }
    }
}

/// Inbound messages, routed purely by which top-level field they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    ResidenceList(Vec<ResidenceItem>),
    PaymentMethods(Vec<PaymentMethodEntry>),
    Error(ApiError),
    Unrecognized,
}

impl ServerEvent {
    /// Decodes a text frame. Anything that does not match a known shape,
    /// including invalid JSON, becomes [`ServerEvent::Unrecognized`].
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Self::from_fields(fields),
            _ => Self::Unrecognized,
        }
    }

    fn from_fields(mut fields: Map<String, Value>) -> Self {
        if let Some(list) = fields.remove("residence_list") {
            return serde_json::from_value(list)
                .map(Self::ResidenceList)
                .unwrap_or(Self::Unrecognized);
        }
        if let Some(methods) = fields.remove("payment_methods") {
            return serde_json::from_value(methods)
                .map(Self::PaymentMethods)
                .unwrap_or(Self::Unrecognized);
        }
        if let Some(error) = fields.remove("error") {
            let msg_type = match fields.remove("msg_type") {
                Some(Value::String(msg_type)) => Some(msg_type),
                _ => None,
            };
            return serde_json::from_value::<ApiError>(error)
                .map(|error| Self::Error(ApiError { msg_type, ..error }))
                .unwrap_or(Self::Unrecognized);
        }
        Self::Unrecognized
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ResidenceList(_) => "residence_list",
            Self::PaymentMethods(_) => "payment_methods",
            Self::Error(_) => "error",
            Self::Unrecognized => "unrecognized",
        }
    }
}
