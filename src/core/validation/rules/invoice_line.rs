//! Rules for an [`InvoiceLine`]
//!
//! Ledger codes are checked twice: locally for presence, then against the
//! route's reference lists. The reference checks are guarded on presence so a
//! blank code reports once.

use super::payment_request::{MARKETING_YEAR_MAX, MARKETING_YEAR_MIN};
use crate::core::route::RouteContext;
use crate::core::validation::RuleSet;
use crate::core::validation::validators::{
    has_at_most_two_decimal_places, is_in_range, is_one_of, is_present, is_present_opt,
    is_within_monetary_limit,
};
use crate::entities::{ALLOWED_CURRENCIES, InvoiceLine};
use crate::reference::ReferenceQuery;

pub fn invoice_line_rules() -> RuleSet<InvoiceLine, RouteContext> {
    let mut rules = RuleSet::<InvoiceLine, RouteContext>::new("invoice_line");

    rules.must(
        "invoice_line.value_precision",
        "value",
        "Invoice line value cannot be more than 2dp",
        |l, _| has_at_most_two_decimal_places(&l.value),
    );
    rules.must(
        "invoice_line.value_limit",
        "value",
        "Invoice line value must be between -999999999.99 and 999999999.99",
        |l, _| is_within_monetary_limit(&l.value),
    );

    rules
        .must(
            "invoice_line.currency_allowed",
            "currency",
            "Currency must be GBP or EUR",
            |l, _| l.currency.as_deref().is_some_and(|c| is_one_of(c, &ALLOWED_CURRENCIES)),
        )
        .when(|l, _| is_present_opt(l.currency.as_deref()));
    rules
        .must(
            "invoice_line.currency_present",
            "currency",
            "Currency is missing",
            |l, _| is_present_opt(l.currency.as_deref()),
        )
        .when(|_, ctx| ctx.status.requires_completeness());

    rules.must(
        "invoice_line.description_present",
        "description",
        "Line Description is missing",
        |l, _| is_present(&l.description),
    );
    rules.must(
        "invoice_line.scheme_code_present",
        "schemeCode",
        "Scheme Code is missing",
        |l, _| is_present(&l.scheme_code),
    );
    rules.must(
        "invoice_line.fund_code_present",
        "fundCode",
        "Fund Code is missing",
        |l, _| is_present(&l.fund_code),
    );
    rules.must(
        "invoice_line.main_account_present",
        "mainAccount",
        "Main Account is missing",
        |l, _| is_present(&l.main_account),
    );
    rules.must(
        "invoice_line.delivery_body_present",
        "deliveryBody",
        "Delivery Body is missing",
        |l, _| is_present(&l.delivery_body),
    );
    rules.must(
        "invoice_line.marketing_year_range",
        "marketingYear",
        "Marketing Year must be between 2021 and 2099",
        |l, _| is_in_range(l.marketing_year, MARKETING_YEAR_MIN, MARKETING_YEAR_MAX),
    );

    rules
        .reference(
            "invoice_line.scheme_code_known",
            "schemeCode",
            "Scheme Code is invalid",
            |_, ctx| ReferenceQuery::scheme_codes(&ctx.route),
            |l, data| data.contains_code(&l.scheme_code),
        )
        .when(|l, _| is_present(&l.scheme_code));
    rules
        .reference(
            "invoice_line.fund_code_known",
            "fundCode",
            "Fund Code is invalid",
            |_, ctx| ReferenceQuery::fund_codes(&ctx.route),
            |l, data| data.contains_code(&l.fund_code),
        )
        .when(|l, _| is_present(&l.fund_code));
    rules
        .reference(
            "invoice_line.main_account_known",
            "mainAccount",
            "Main Account is invalid",
            |_, ctx| ReferenceQuery::main_account_codes(&ctx.route),
            |l, data| data.contains_code(&l.main_account),
        )
        .when(|l, _| is_present(&l.main_account));
    rules
        .reference(
            "invoice_line.delivery_body_known",
            "deliveryBody",
            "Delivery Body is invalid",
            |_, ctx| ReferenceQuery::delivery_body_codes(&ctx.route),
            |l, data| data.contains_code(&l.delivery_body),
        )
        .when(|l, _| is_present(&l.delivery_body));
    rules
        .reference(
            "invoice_line.marketing_year_known",
            "marketingYear",
            "Marketing Year is invalid",
            |_, ctx| ReferenceQuery::marketing_years(&ctx.route),
            |l, data| data.contains_code(&l.marketing_year.to_string()),
        )
        .when(|l, _| is_in_range(l.marketing_year, MARKETING_YEAR_MIN, MARKETING_YEAR_MAX));
    rules
        .reference(
            "invoice_line.route_combination_known",
            "",
            "Account / Scheme / Delivery Body combination is invalid",
            |_, ctx| ReferenceQuery::combinations_for_route(&ctx.route),
            |l, data| data.contains_combination(&l.main_account, &l.delivery_body, &l.scheme_code),
        )
        .when(|l, _| {
            is_present(&l.main_account) && is_present(&l.delivery_body) && is_present(&l.scheme_code)
        });

    rules
}
