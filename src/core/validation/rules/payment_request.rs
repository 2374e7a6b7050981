//! Rules for a single [`PaymentRequest`] under a route

use crate::core::route::RouteContext;
use crate::core::validation::RuleSet;
use crate::core::validation::validators::{
    has_at_most_two_decimal_places, has_length_between, has_no_whitespace, is_in_range,
    is_present, is_present_opt, is_within_monetary_limit,
};
use crate::entities::PaymentRequest;

pub const FRN_MIN: u64 = 1_000_000_000;
pub const FRN_MAX: u64 = 9_999_999_999;
pub const SBI_MIN: u64 = 105_000_000;
pub const SBI_MAX: u64 = 999_999_999;
pub const VENDOR_ID_LENGTH: usize = 6;
pub const MARKETING_YEAR_MIN: i32 = 2021;
pub const MARKETING_YEAR_MAX: i32 = 2099;

pub fn payment_request_rules() -> RuleSet<PaymentRequest, RouteContext> {
    let mut rules = RuleSet::<PaymentRequest, RouteContext>::new("payment_request");

    rules.must(
        "payment_request.id_present",
        "paymentRequestId",
        "Payment Request Id is missing",
        |r, _| is_present(&r.payment_request_id),
    );
    rules
        .must(
            "payment_request.id_length",
            "paymentRequestId",
            "Payment Request Id must be between 1 and 20 characters",
            |r, _| has_length_between(&r.payment_request_id, 1, 20),
        )
        .when(|r, _| is_present(&r.payment_request_id));
    rules
        .must(
            "payment_request.id_no_spaces",
            "paymentRequestId",
            "Payment Request Id cannot contain spaces",
            |r, _| has_no_whitespace(&r.payment_request_id),
        )
        .when(|r, _| is_present(&r.payment_request_id));

    rules.must(
        "payment_request.source_system_present",
        "sourceSystem",
        "Source System is missing",
        |r, _| is_present(&r.source_system),
    );
    rules.must(
        "payment_request.due_date_present",
        "dueDate",
        "Due Date is missing",
        |r, _| r.due_date.is_some(),
    );

    // Payee identity: exactly one of SBI, FRN, Vendor
    rules.must(
        "payment_request.single_identity",
        "",
        "Invoice must only have SBI, FRN or Vendor",
        |r, _| r.identity_count() == 1,
    );
    rules
        .must(
            "payment_request.frn_range",
            "frn",
            "FRN must be between 1000000000 and 9999999999",
            |r, _| is_in_range(r.frn, FRN_MIN, FRN_MAX),
        )
        .when(|r, _| r.identity_count() == 1 && r.frn != 0);
    rules
        .must(
            "payment_request.sbi_range",
            "sbi",
            "SBI must be between 105000000 and 999999999",
            |r, _| is_in_range(r.sbi, SBI_MIN, SBI_MAX),
        )
        .when(|r, _| r.identity_count() == 1 && r.sbi != 0);
    rules
        .must(
            "payment_request.vendor_length",
            "vendorId",
            "Vendor must be 6 characters",
            |r, _| r.vendor_id.trim().chars().count() == VENDOR_ID_LENGTH,
        )
        .when(|r, _| r.identity_count() == 1 && is_present(&r.vendor_id));

    rules.must(
        "payment_request.marketing_year_range",
        "marketingYear",
        "Marketing Year must be between 2021 and 2099",
        |r, _| is_in_range(r.marketing_year, MARKETING_YEAR_MIN, MARKETING_YEAR_MAX),
    );

    rules.must(
        "payment_request.value_precision",
        "value",
        "Invoice Value cannot be more than 2dp",
        |r, _| has_at_most_two_decimal_places(&r.value),
    );
    rules.must(
        "payment_request.value_limit",
        "value",
        "Invoice Value must be between -999999999.99 and 999999999.99",
        |r, _| is_within_monetary_limit(&r.value),
    );
    rules
        .must(
            "payment_request.value_non_zero",
            "value",
            "Invoice Value must be non-zero",
            |r, _| !r.value.is_zero(),
        )
        .when(|_, ctx| ctx.status.requires_completeness());
    rules
        .must(
            "payment_request.lines_present",
            "invoiceLines",
            "Invoice Lines must not be empty",
            |r, _| !r.invoice_lines.is_empty(),
        )
        .when(|_, ctx| ctx.status.requires_completeness());

    rules
        .computed("payment_request.value_matches_lines", "value", |r, _| {
            let Some(total) = r.line_total() else {
                return Some("Sum of Line Values is out of range".to_string());
            };
            (r.value != total).then(|| {
                format!(
                    "Invoice Value ({}) does not equal the sum of Line Values ({})",
                    r.value.normalize(),
                    total.normalize()
                )
            })
        })
        .when(|r, _| !r.invoice_lines.is_empty());
    rules.must(
        "payment_request.single_currency",
        "invoiceLines",
        "Cannot mix currencies in an invoice",
        |r, _| r.distinct_line_currencies().len() <= 1,
    );

    // Recoveries against an earlier invoice
    rules
        .must(
            "payment_request.original_invoice_number_present",
            "originalInvoiceNumber",
            "Original Invoice Number is missing",
            |r, _| is_present_opt(r.original_invoice_number.as_deref()),
        )
        .when(|_, ctx| ctx.is_receivable());
    rules
        .must(
            "payment_request.original_settlement_date_present",
            "originalSettlementDate",
            "Original Settlement Date is missing",
            |r, _| r.original_settlement_date.is_some(),
        )
        .when(|_, ctx| ctx.is_receivable());
    rules
        .must(
            "payment_request.recovery_date_present",
            "recoveryDate",
            "Recovery Date is missing",
            |r, _| r.recovery_date.is_some(),
        )
        .when(|_, ctx| ctx.is_receivable());

    rules
}
