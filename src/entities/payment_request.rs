use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{InvoiceLine, is_blank};

/// One claim within a batch
///
/// Exactly one of `frn`, `sbi` and `vendor_id` identifies the payee; zero means
/// unset for the numeric identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequest {
    pub payment_request_id: String,
    pub source_system: String,
    pub frn: u64,
    pub sbi: u64,
    pub vendor_id: String,
    pub agreement_number: String,
    pub due_date: Option<NaiveDate>,
    pub marketing_year: i32,
    pub value: Decimal,
    pub original_invoice_number: Option<String>,
    pub original_settlement_date: Option<NaiveDate>,
    pub recovery_date: Option<NaiveDate>,
    pub invoice_lines: Vec<InvoiceLine>,
    pub appendix_references: Vec<String>,
}

impl PaymentRequest {
    /// Number of payee identifiers that are populated
    pub fn identity_count(&self) -> usize {
        [self.sbi != 0, self.frn != 0, !is_blank(&self.vendor_id)]
            .into_iter()
            .filter(|present| *present)
            .count()
    }

    /// Sum of all invoice line values, `None` if the sum overflows
    pub fn line_total(&self) -> Option<Decimal> {
        self.invoice_lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.value))
    }

    /// Distinct non-null line currencies, compared case-insensitively
    pub fn distinct_line_currencies(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for currency in self.invoice_lines.iter().filter_map(|l| l.currency.as_deref()) {
            let normalised = currency.trim().to_ascii_uppercase();
            if !seen.contains(&normalised) {
                seen.push(normalised);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(value: i64, currency: Option<&str>) -> InvoiceLine {
        InvoiceLine {
            value: Decimal::from(value),
            currency: currency.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_identity_count() {
        let mut request = PaymentRequest::default();
        assert_eq!(request.identity_count(), 0);

        request.frn = 1234567890;
        assert_eq!(request.identity_count(), 1);

        request.vendor_id = "A12345".to_string();
        assert_eq!(request.identity_count(), 2);

        request.vendor_id = "   ".to_string();
        assert_eq!(request.identity_count(), 1);
    }

    #[test]
    fn test_line_total() {
        let request = PaymentRequest {
            invoice_lines: vec![line(5, None), line(4, None)],
            ..Default::default()
        };
        assert_eq!(request.line_total(), Some(Decimal::from(9)));
    }

    #[test]
    fn test_line_total_overflow() {
        let max = InvoiceLine {
            value: Decimal::MAX,
            ..Default::default()
        };
        let request = PaymentRequest {
            invoice_lines: vec![max.clone(), max],
            ..Default::default()
        };
        assert_eq!(request.line_total(), None);
    }

    #[test]
    fn test_distinct_line_currencies_ignores_unset() {
        let request = PaymentRequest {
            invoice_lines: vec![line(1, Some("GBP")), line(1, None), line(1, Some("gbp"))],
            ..Default::default()
        };
        assert_eq!(request.distinct_line_currencies(), vec!["GBP".to_string()]);
    }
}
