//! Submission data model
//!
//! A [`PaymentRequestBatch`] owns its [`PaymentRequest`]s, which own their
//! [`InvoiceLine`]s. All three are transient: deserialized per HTTP request,
//! validated, then handed on.

pub mod batch;
pub mod invoice_line;
pub mod payment_request;

pub use batch::{AccountType, BatchStatus, PaymentRequestBatch};
pub use invoice_line::{ALLOWED_CURRENCIES, InvoiceLine};
pub use payment_request::PaymentRequest;

/// True when the string is empty or only whitespace
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
