use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currencies an invoice line may be raised in
pub const ALLOWED_CURRENCIES: [&str; 2] = ["GBP", "EUR"];

/// A single ledger line of a payment request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceLine {
    pub value: Decimal,
    pub currency: Option<String>,
    pub description: String,
    pub scheme_code: String,
    pub fund_code: String,
    pub main_account: String,
    pub delivery_body: String,
    pub marketing_year: i32,
}
