//! Rules for a whole [`PaymentRequestBatch`]
//!
//! Reference checks for organisation, scheme type and payment type only run
//! once the fields they are keyed on are filled in, so a missing account type
//! reports "missing" rather than a cascade of "invalid".

use std::collections::HashSet;

use crate::core::validation::RuleSet;
use crate::core::validation::validators::{is_one_of, is_present};
use crate::entities::PaymentRequestBatch;
use crate::reference::ReferenceQuery;

pub fn batch_rules() -> RuleSet<PaymentRequestBatch, ()> {
    let mut rules = RuleSet::<PaymentRequestBatch, ()>::new("batch");

    rules.must("batch.id_present", "id", "Invoice Id is missing", |b, _| {
        is_present(&b.id)
    });

    rules.must(
        "batch.account_type_present",
        "accountType",
        "Account Type is missing",
        |b, _| is_present(&b.account_type),
    );
    rules
        .must(
            "batch.account_type_valid",
            "accountType",
            "Account Type is invalid. It should be either AP or AR",
            |b, _| is_one_of(&b.account_type, &["AP", "AR"]),
        )
        .when(|b, _| is_present(&b.account_type));

    rules.must(
        "batch.organisation_present",
        "organisation",
        "Organisation is missing",
        |b, _| is_present(&b.organisation),
    );
    rules.must(
        "batch.scheme_type_present",
        "schemeType",
        "Scheme Type is missing",
        |b, _| is_present(&b.scheme_type),
    );
    rules.must(
        "batch.payment_type_present",
        "paymentType",
        "Payment Type is missing",
        |b, _| is_present(&b.payment_type),
    );

    rules.must(
        "batch.payment_requests_present",
        "paymentRequests",
        "Payment Requests are missing",
        |b, _| !b.payment_requests.is_empty(),
    );
    rules.must(
        "batch.payment_request_ids_unique",
        "paymentRequests",
        "Payment Request Ids must be unique within an invoice",
        |b, _| {
            let mut seen = HashSet::new();
            b.payment_requests
                .iter()
                .map(|r| r.payment_request_id.trim())
                .filter(|id| !id.is_empty())
                .all(|id| seen.insert(id.to_ascii_lowercase()))
        },
    );

    rules
        .reference(
            "batch.organisation_known",
            "organisation",
            "Organisation is invalid",
            |b, _| ReferenceQuery::organisations(&b.account_type),
            |b, data| data.contains_code(&b.organisation),
        )
        .when(|b, _| is_present(&b.account_type) && is_present(&b.organisation));

    rules
        .reference(
            "batch.scheme_type_known",
            "schemeType",
            "Scheme Type is invalid",
            |b, _| ReferenceQuery::scheme_types(&b.account_type, &b.organisation),
            |b, data| data.contains_code(&b.scheme_type),
        )
        .when(|b, _| {
            is_present(&b.account_type) && is_present(&b.organisation) && is_present(&b.scheme_type)
        });

    rules
        .reference(
            "batch.payment_type_known",
            "paymentType",
            "Payment Type is invalid",
            |b, _| {
                ReferenceQuery::payment_types(&b.account_type, &b.organisation, &b.scheme_type)
            },
            |b, data| data.contains_code(&b.payment_type),
        )
        .when(|b, _| {
            is_present(&b.account_type)
                && is_present(&b.organisation)
                && is_present(&b.scheme_type)
                && is_present(&b.payment_type)
        });

    rules
}
