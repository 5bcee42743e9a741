use serde::{Deserialize, Deserializer, Serialize};

/// Label shown for the "no selection" dropdown entry.
pub const PLACEHOLDER_LABEL: &str = "Please select a country";

/// A selectable country record as delivered by the residence feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidenceItem {
    pub text: String,
    pub value: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_idd: String,
}

impl ResidenceItem {
    pub fn new(
        text: impl Into<String>,
        value: impl Into<String>,
        phone_idd: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            phone_idd: phone_idd.into(),
        }
    }

    /// The sentinel used while nothing is selected. Never part of a country list.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Real items always carry a code, so an empty code marks the sentinel.
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }

    pub fn option_label(&self) -> String {
        format!("{} - {}", self.text, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodEntry {
    pub display_name: String,
    #[serde(default)]
    pub supported_currencies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl PaymentMethodEntry {
    pub fn currencies_label(&self) -> String {
        self.supported_currencies.join(", ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
