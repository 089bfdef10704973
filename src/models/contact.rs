use serde::{Deserialize, Serialize};

/// Contact card fields as entered by the user. The pipeline only reads these.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "zip")]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Trimmed value of an optional field, `None` when blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ContactInfo {
    pub fn first_name(&self) -> Option<&str> {
        Some(self.first_name.trim()).filter(|v| !v.is_empty())
    }

    /// True when any name or reachable contact field carries a value.
    pub fn has_contact_fields(&self) -> bool {
        self.first_name().is_some()
            || non_blank(&self.last_name).is_some()
            || non_blank(&self.phone).is_some()
            || non_blank(&self.email).is_some()
            || non_blank(&self.organization).is_some()
            || non_blank(&self.url).is_some()
    }
}

impl Address {
    pub fn is_empty(&self) -> bool {
        [
            &self.street,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .all(|field| non_blank(field).is_none())
    }
}
