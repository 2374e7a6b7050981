//! Route value object
//!
//! A route is the (account type, organisation, payment type, scheme type)
//! tuple that decides which reference-data lists apply to a submission. It is
//! built once per validation and passed by reference into nested validators.

use serde::{Deserialize, Serialize};

use crate::entities::{AccountType, BatchStatus, PaymentRequestBatch};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    /// Account type, sent to the reference data service as `invoiceType`
    #[serde(alias = "invoiceType")]
    pub account_type: String,
    pub organisation: String,
    pub payment_type: String,
    pub scheme_type: String,
}

impl Route {
    pub fn new(
        account_type: impl Into<String>,
        organisation: impl Into<String>,
        payment_type: impl Into<String>,
        scheme_type: impl Into<String>,
    ) -> Self {
        Self {
            account_type: account_type.into(),
            organisation: organisation.into(),
            payment_type: payment_type.into(),
            scheme_type: scheme_type.into(),
        }
    }

    /// Resolve the route a batch's payment requests are validated under
    pub fn from_batch(batch: &PaymentRequestBatch) -> Self {
        Self::new(
            batch.account_type.trim(),
            batch.organisation.trim(),
            batch.payment_type.trim(),
            batch.scheme_type.trim(),
        )
    }

    pub fn account_type(&self) -> Option<AccountType> {
        AccountType::parse(&self.account_type)
    }
}

/// Everything a payment request or invoice line rule may depend on besides
/// the entity itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    pub route: Route,
    pub status: BatchStatus,
}

impl RouteContext {
    pub fn new(route: Route, status: BatchStatus) -> Self {
        Self { route, status }
    }

    pub fn is_receivable(&self) -> bool {
        self.route.account_type() == Some(AccountType::AR)
    }
}
