use serde::{Deserialize, Serialize};

use crate::core::AppError;

/// Payment rail a fee schedule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelType {
    /// M-PESA direct send money
    #[serde(rename = "mpesa_send", alias = "send_money")]
    SendMoney,

    /// M-PESA paybill
    #[serde(rename = "paybill")]
    Paybill,
}

impl ChannelType {
    /// Identifier stored in `transaction_charges.transaction_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SendMoney => "mpesa_send",
            Self::Paybill => "paybill",
        }
    }

    /// Label shown on transaction forms and CSV imports
    pub fn label(&self) -> &'static str {
        match self {
            Self::SendMoney => "M-PESA Send Money",
            Self::Paybill => "M-PESA Paybill",
        }
    }

    /// Channel named in a request; missing or empty means send money
    pub fn from_optional(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::SendMoney),
            Some(raw) => raw.parse(),
        }
    }

    /// Lenient read of a stored `type` column
    ///
    /// Ledger rows also carry non-M-PESA types ("Bank Transfer", "Other");
    /// those have no fee channel and map to `None`.
    pub fn from_stored(value: Option<&str>) -> Option<Self> {
        Self::from_optional(value).ok()
    }
}

impl Default for ChannelType {
    fn default() -> Self {
        Self::SendMoney
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChannelType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mpesa_send" | "send_money" | "m-pesa send money" => Ok(Self::SendMoney),
            "paybill" | "m-pesa paybill" => Ok(Self::Paybill),
            _ => Err(AppError::invalid_argument(format!(
                "Unknown channel type: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for ChannelType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
