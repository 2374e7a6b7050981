//! Reference data lookups
//!
//! A [`ReferenceQuery`] names the lookup and carries its parameters in the
//! order the service expects them. The query doubles as the cache key, so two
//! queries with the same values in a different field order are distinct.

use std::fmt;

use crate::core::route::Route;

/// Shape of the JSON array a lookup returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    /// `[{code, description}]`
    Codes,
    /// `[{accountCode, deliveryBodyCode, schemeCode}]`
    Combinations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupType {
    SchemeTypes,
    Organisations,
    PaymentTypes,
    SchemeCodes,
    FundCodes,
    MainAccountCodes,
    DeliveryBodyCodes,
    CombinationsForRoute,
    MarketingYears,
}

impl LookupType {
    /// Path relative to the reference data base address
    pub fn path(&self) -> &'static str {
        match self {
            LookupType::SchemeTypes => "schemeTypes",
            LookupType::Organisations => "organisations",
            LookupType::PaymentTypes => "paymentTypes",
            LookupType::SchemeCodes => "schemeCodes",
            LookupType::FundCodes => "fundCodes",
            LookupType::MainAccountCodes => "mainAccountCodes",
            LookupType::DeliveryBodyCodes => "deliveryBodyCodes",
            LookupType::CombinationsForRoute => "combinationsForRoute",
            LookupType::MarketingYears => "marketingYears",
        }
    }

    pub fn shape(&self) -> DataShape {
        match self {
            LookupType::CombinationsForRoute => DataShape::Combinations,
            LookupType::SchemeTypes
            | LookupType::Organisations
            | LookupType::PaymentTypes
            | LookupType::SchemeCodes
            | LookupType::FundCodes
            | LookupType::MainAccountCodes
            | LookupType::DeliveryBodyCodes
            | LookupType::MarketingYears => DataShape::Codes,
        }
    }
}

impl fmt::Display for LookupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceQuery {
    lookup: LookupType,
    params: Vec<(&'static str, String)>,
}

impl ReferenceQuery {
    fn new(lookup: LookupType, params: Vec<(&'static str, &str)>) -> Self {
        Self {
            lookup,
            params: params
                .into_iter()
                .map(|(name, value)| (name, value.trim().to_string()))
                .collect(),
        }
    }

    pub fn scheme_types(invoice_type: &str, organisation: &str) -> Self {
        Self::new(
            LookupType::SchemeTypes,
            vec![("invoiceType", invoice_type), ("organisation", organisation)],
        )
    }

    pub fn organisations(invoice_type: &str) -> Self {
        Self::new(LookupType::Organisations, vec![("invoiceType", invoice_type)])
    }

    pub fn payment_types(invoice_type: &str, organisation: &str, scheme_type: &str) -> Self {
        Self::new(
            LookupType::PaymentTypes,
            vec![
                ("invoiceType", invoice_type),
                ("organisation", organisation),
                ("schemeType", scheme_type),
            ],
        )
    }

    pub fn scheme_codes(route: &Route) -> Self {
        Self::for_route(LookupType::SchemeCodes, "invoiceType", route)
    }

    pub fn fund_codes(route: &Route) -> Self {
        Self::for_route(LookupType::FundCodes, "invoiceType", route)
    }

    pub fn main_account_codes(route: &Route) -> Self {
        Self::for_route(LookupType::MainAccountCodes, "invoiceType", route)
    }

    pub fn delivery_body_codes(route: &Route) -> Self {
        Self::for_route(LookupType::DeliveryBodyCodes, "invoiceType", route)
    }

    pub fn marketing_years(route: &Route) -> Self {
        Self::for_route(LookupType::MarketingYears, "invoiceType", route)
    }

    pub fn combinations_for_route(route: &Route) -> Self {
        Self::for_route(LookupType::CombinationsForRoute, "accountType", route)
    }

    fn for_route(lookup: LookupType, account_param: &'static str, route: &Route) -> Self {
        Self::new(
            lookup,
            vec![
                (account_param, route.account_type.as_str()),
                ("organisation", route.organisation.as_str()),
                ("paymentType", route.payment_type.as_str()),
                ("schemeType", route.scheme_type.as_str()),
            ],
        )
    }

    pub fn lookup(&self) -> LookupType {
        self.lookup
    }

    /// Parameters that will be sent; empty values mean "match any" and are omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        self.params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (*name, value.as_str()))
            .collect()
    }

    /// Relative path and query string, used for logging and by the HTTP client
    pub fn path_and_query(&self) -> String {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return format!("/{}", self.lookup.path());
        }

        let query = pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("/{}?{}", self.lookup.path(), query)
    }
}

impl fmt::Display for ReferenceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_and_query())
    }
}
