//! SIP account fields

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FieldError;

/// Registration settings of the first SIP line
///
/// The field set is closed: every value is addressed through [`SipField`],
/// so nothing outside the known keys can be introduced.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SipAccount {
    pub phone_number: String,
    pub display_name: String,
    pub register_addr: String,
    pub register_port: String,
    pub register_user: String,
    pub register_password: String,
    pub register_ttl: String,
    pub enable_reg: String,
}

impl SipAccount {
    pub fn get(&self, field: SipField) -> &str {
        match field {
            SipField::PhoneNumber => &self.phone_number,
            SipField::DisplayName => &self.display_name,
            SipField::RegisterAddr => &self.register_addr,
            SipField::RegisterPort => &self.register_port,
            SipField::RegisterUser => &self.register_user,
            SipField::RegisterPassword => &self.register_password,
            SipField::RegisterTtl => &self.register_ttl,
            SipField::EnableReg => &self.enable_reg,
        }
    }

    pub fn set(&mut self, field: SipField, value: impl Into<String>) {
        let slot = match field {
            SipField::PhoneNumber => &mut self.phone_number,
            SipField::DisplayName => &mut self.display_name,
            SipField::RegisterAddr => &mut self.register_addr,
            SipField::RegisterPort => &mut self.register_port,
            SipField::RegisterUser => &mut self.register_user,
            SipField::RegisterPassword => &mut self.register_password,
            SipField::RegisterTtl => &mut self.register_ttl,
            SipField::EnableReg => &mut self.enable_reg,
        };
        *slot = value.into();
    }

    /// Field/value pairs in display order
    pub fn entries(&self) -> impl Iterator<Item = (SipField, &str)> + '_ {
        SipField::ALL.iter().map(move |field| (*field, self.get(*field)))
    }
}

// Keeps the registration password out of logs
impl fmt::Debug for SipAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipAccount")
            .field("phone_number", &self.phone_number)
            .field("display_name", &self.display_name)
            .field("register_addr", &self.register_addr)
            .field("register_port", &self.register_port)
            .field("register_user", &self.register_user)
            .field("register_password", &"***")
            .field("register_ttl", &self.register_ttl)
            .field("enable_reg", &self.enable_reg)
            .finish()
    }
}

/// Known SIP account field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SipField {
    PhoneNumber,
    DisplayName,
    RegisterAddr,
    RegisterPort,
    RegisterUser,
    RegisterPassword,
    RegisterTtl,
    EnableReg,
}

impl SipField {
    pub const ALL: [SipField; 8] = [
        SipField::PhoneNumber,
        SipField::DisplayName,
        SipField::RegisterAddr,
        SipField::RegisterPort,
        SipField::RegisterUser,
        SipField::RegisterPassword,
        SipField::RegisterTtl,
        SipField::EnableReg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SipField::PhoneNumber => "phone_number",
            SipField::DisplayName => "display_name",
            SipField::RegisterAddr => "register_addr",
            SipField::RegisterPort => "register_port",
            SipField::RegisterUser => "register_user",
            SipField::RegisterPassword => "register_password",
            SipField::RegisterTtl => "register_ttl",
            SipField::EnableReg => "enable_reg",
        }
    }
}

impl fmt::Display for SipField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SipField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SipField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownSipField(s.to_string()))
    }
}
