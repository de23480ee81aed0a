//! DSS (programmable line key) descriptors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FieldError;

/// Key type given to freshly added keys
pub const DEFAULT_DSS_KEY_TYPE: u32 = 1;

/// Icon given to freshly added keys and to keys stored without one
pub const DEFAULT_DSS_ICON: &str = "Green";

fn default_icon() -> String {
    DEFAULT_DSS_ICON.to_string()
}

/// One programmable button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DssKey {
    /// 1-based physical position, equal to the key's place in its list
    #[serde(rename = "index", alias = "position")]
    pub position: u32,
    pub key_type: u32,
    pub value: String,
    pub label: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl DssKey {
    /// Blank key at the given position
    pub fn blank(position: u32) -> Self {
        Self {
            position,
            key_type: DEFAULT_DSS_KEY_TYPE,
            value: String::new(),
            label: String::new(),
            icon: default_icon(),
        }
    }

    pub fn get(&self, field: DssField) -> String {
        match field {
            DssField::KeyType => self.key_type.to_string(),
            DssField::Value => self.value.clone(),
            DssField::Label => self.label.clone(),
            DssField::Icon => self.icon.clone(),
        }
    }

    /// Replace one attribute. The key is left untouched when the value is rejected.
    pub fn set(&mut self, field: DssField, value: &str) -> Result<(), FieldError> {
        match field {
            DssField::KeyType => {
                self.key_type = value
                    .trim()
                    .parse()
                    .map_err(|_| FieldError::InvalidKeyType(value.to_string()))?;
            }
            DssField::Value => self.value = value.to_string(),
            DssField::Label => self.label = value.to_string(),
            DssField::Icon => self.icon = value.to_string(),
        }
        Ok(())
    }
}

/// Editable DSS key attributes
///
/// The position is not editable; it always follows list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DssField {
    KeyType,
    Value,
    Label,
    Icon,
}

impl DssField {
    pub const ALL: [DssField; 4] = [
        DssField::KeyType,
        DssField::Value,
        DssField::Label,
        DssField::Icon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DssField::KeyType => "key_type",
            DssField::Value => "value",
            DssField::Label => "label",
            DssField::Icon => "icon",
        }
    }
}

impl fmt::Display for DssField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DssField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DssField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownDssField(s.to_string()))
    }
}
