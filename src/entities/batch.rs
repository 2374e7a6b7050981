use serde::{Deserialize, Serialize};
use std::fmt;

use super::PaymentRequest;

/// Ledger an invoice is raised against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Accounts payable: money paid out
    AP,
    /// Accounts receivable: money recovered
    AR,
}

impl AccountType {
    /// Parse a submitted account type, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AP" => Some(AccountType::AP),
            "AR" => Some(AccountType::AR),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::AP => "AP",
            AccountType::AR => "AR",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchStatus {
    #[default]
    New,
    AwaitingApproval,
    Approved,
    Rejected,
}

impl BatchStatus {
    /// Statuses at which a payment request must carry a value and lines
    pub fn requires_completeness(&self) -> bool {
        matches!(self, BatchStatus::AwaitingApproval | BatchStatus::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::New => "new",
            BatchStatus::AwaitingApproval => "awaiting-approval",
            BatchStatus::Approved => "approved",
            BatchStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level invoice submission
///
/// `account_type` stays a raw string so that an unknown value is reported as a
/// validation failure rather than rejected at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequestBatch {
    pub id: String,
    #[serde(alias = "invoiceType")]
    pub account_type: String,
    pub organisation: String,
    pub payment_type: String,
    pub scheme_type: String,
    pub status: BatchStatus,
    pub payment_requests: Vec<PaymentRequest>,
}

impl PaymentRequestBatch {
    /// Typed account type, if the submitted value is recognised
    pub fn account_type(&self) -> Option<AccountType> {
        AccountType::parse(&self.account_type)
    }
}
