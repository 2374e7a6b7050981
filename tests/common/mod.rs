//! Shared fixtures for integration tests
//!
//! [`MockReferenceClient`] serves canned reference lists per lookup type and
//! counts every call, so tests can assert exactly how often the remote
//! service would have been hit.

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::http::StatusCode;
use chrono::NaiveDate;
use payval::prelude::*;
use serde_json::json;
use tokio::sync::Notify;

pub struct MockReferenceClient {
    responses: Mutex<HashMap<LookupType, (StatusCode, String)>>,
    calls: AtomicUsize,
    calls_by_lookup: Mutex<HashMap<LookupType, usize>>,
    delay: Option<Duration>,
    gate: Option<Gate>,
    unreachable: bool,
}

/// Holds fetches for one lookup until released
struct Gate {
    lookup: LookupType,
    started: Arc<Notify>,
    release: Arc<Notify>,
}

impl MockReferenceClient {
    /// Lists matching [`valid_batch`]'s route and codes
    pub fn new() -> Self {
        let client = Self::empty();
        client.set_codes(LookupType::Organisations, &["RPA"]);
        client.set_codes(LookupType::SchemeTypes, &["BPS", "CS"]);
        client.set_codes(LookupType::PaymentTypes, &["DOM"]);
        client.set_codes(LookupType::SchemeCodes, &["80001"]);
        client.set_codes(LookupType::FundCodes, &["DRD10"]);
        client.set_codes(LookupType::MainAccountCodes, &["SOS273"]);
        client.set_codes(LookupType::DeliveryBodyCodes, &["RP00"]);
        client.set_codes(LookupType::MarketingYears, &["2023", "2024"]);
        client.set_response(
            LookupType::CombinationsForRoute,
            StatusCode::OK,
            json!([{"accountCode": "SOS273", "deliveryBodyCode": "RP00", "schemeCode": "80001"}])
                .to_string(),
        );
        client
    }

    /// Every lookup answers 200 with an empty list
    pub fn empty() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            calls_by_lookup: Mutex::new(HashMap::new()),
            delay: None,
            gate: None,
            unreachable: false,
        }
    }

    /// Every call fails before any response is received
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::empty()
        }
    }

    /// Hold each call open for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Signal `started` when a `lookup` fetch begins, then wait for `release`
    pub fn with_gate(
        mut self,
        lookup: LookupType,
        started: Arc<Notify>,
        release: Arc<Notify>,
    ) -> Self {
        self.gate = Some(Gate {
            lookup,
            started,
            release,
        });
        self
    }

    pub fn set_codes(&self, lookup: LookupType, codes: &[&str]) {
        let body: Vec<_> = codes
            .iter()
            .map(|code| json!({"code": code, "description": format!("{code} description")}))
            .collect();
        self.set_response(lookup, StatusCode::OK, serde_json::Value::from(body).to_string());
    }

    pub fn set_response(&self, lookup: LookupType, status: StatusCode, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(lookup, (status, body.into()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, lookup: LookupType) -> usize {
        self.calls_by_lookup
            .lock()
            .unwrap()
            .get(&lookup)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ReferenceDataClient for MockReferenceClient {
    async fn fetch(&self, query: &ReferenceQuery) -> Result<RawResponse, ReferenceDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .calls_by_lookup
            .lock()
            .unwrap()
            .entry(query.lookup())
            .or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(gate) = self.gate.as_ref().filter(|g| g.lookup == query.lookup()) {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        if self.unreachable {
            return Err(ReferenceDataError::UrlJoin {
                path: query.lookup().path().to_string(),
                message: "connection refused".to_string(),
            });
        }

        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .get(&query.lookup())
            .cloned()
            .unwrap_or((StatusCode::OK, "[]".to_string()));
        Ok(RawResponse::new(status, body))
    }
}

pub fn cached_provider(client: Arc<MockReferenceClient>) -> Arc<CachedReferenceDataProvider> {
    Arc::new(CachedReferenceDataProvider::new(
        client,
        ExpirationPolicy::default(),
    ))
}

pub fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn valid_line(value: &str) -> InvoiceLine {
    InvoiceLine {
        value: decimal(value),
        currency: Some("GBP".to_string()),
        description: "G00 - Gross value of claim".to_string(),
        scheme_code: "80001".to_string(),
        fund_code: "DRD10".to_string(),
        main_account: "SOS273".to_string(),
        delivery_body: "RP00".to_string(),
        marketing_year: 2024,
    }
}

pub fn valid_request(id: &str) -> PaymentRequest {
    PaymentRequest {
        payment_request_id: id.to_string(),
        source_system: "SITI".to_string(),
        frn: 1_234_567_890,
        agreement_number: "AG-1".to_string(),
        due_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        marketing_year: 2024,
        value: decimal("100.00"),
        invoice_lines: vec![valid_line("60.00"), valid_line("40.00")],
        ..Default::default()
    }
}

pub fn valid_batch() -> PaymentRequestBatch {
    PaymentRequestBatch {
        id: "INV-0001".to_string(),
        account_type: "AP".to_string(),
        organisation: "RPA".to_string(),
        payment_type: "DOM".to_string(),
        scheme_type: "BPS".to_string(),
        status: BatchStatus::New,
        payment_requests: vec![valid_request("PR-0001")],
    }
}

pub fn valid_batch_json() -> serde_json::Value {
    json!({
        "id": "INV-0001",
        "accountType": "AP",
        "organisation": "RPA",
        "paymentType": "DOM",
        "schemeType": "BPS",
        "status": "new",
        "paymentRequests": [{
            "paymentRequestId": "PR-0001",
            "sourceSystem": "SITI",
            "frn": 1234567890u64,
            "agreementNumber": "AG-1",
            "dueDate": "2024-06-01",
            "marketingYear": 2024,
            "value": "100.00",
            "invoiceLines": [{
                "value": "100.00",
                "currency": "GBP",
                "description": "G00 - Gross value of claim",
                "schemeCode": "80001",
                "fundCode": "DRD10",
                "mainAccount": "SOS273",
                "deliveryBody": "RP00",
                "marketingYear": 2024
            }]
        }]
    })
}
