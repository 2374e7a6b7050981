//! Generic rule engine
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s over an entity `T` with a
//! context `C`. Each rule carries a stable id, the field it reports against,
//! a [`Guard`] deciding whether it applies, and a [`Check`] deciding whether
//! it passes. Evaluation walks the rules in declaration order and never stops
//! early: every applicable rule is evaluated and every failure kept.
//!
//! ```rust,ignore
//! let mut rules = RuleSet::<PaymentRequest, RouteContext>::new("payment_request");
//! rules
//!     .must("frn_range", "frn", "FRN must be between 1000000000 and 9999999999",
//!           |r, _| is_in_range(r.frn, FRN_MIN, FRN_MAX))
//!     .when(|r, _| r.identity_count() == 1 && r.frn != 0);
//! let result = rules.evaluate(&request, &ctx, provider, "").await;
//! ```

use tracing::debug;

use super::result::{SkippedRule, ValidationFailure, ValidationResult, field_path};
use crate::reference::{ReferenceData, ReferenceDataProvider, ReferenceQuery};

/// Synchronous predicate over an entity and its context
pub type Predicate<T, C> = fn(&T, &C) -> bool;

/// Decides whether a rule applies at all
pub enum Guard<T, C> {
    Unconditional,
    /// The rule is skipped, not passed, when the predicate is false
    GuardedBy(Predicate<T, C>),
}

/// How a rule decides pass or fail
pub enum Check<T, C> {
    /// Passes when the predicate is true; fails with the rule's message
    Predicate(Predicate<T, C>),
    /// Fails with the returned message, for messages that embed values
    Computed(fn(&T, &C) -> Option<String>),
    /// Passes when a reference list lookup succeeds and accepts the value
    Reference(ReferenceCheck<T, C>),
}

/// Reference-data membership check
///
/// Passes only when the provider call succeeded, the list is non-empty, and
/// `accept` finds the submitted value in it.
pub struct ReferenceCheck<T, C> {
    pub query: fn(&T, &C) -> ReferenceQuery,
    pub accept: fn(&T, &ReferenceData) -> bool,
}

pub struct Rule<T, C> {
    pub id: &'static str,
    pub field: &'static str,
    pub message: &'static str,
    pub guard: Guard<T, C>,
    pub check: Check<T, C>,
}

impl<T, C> Rule<T, C> {
    /// Only evaluate this rule when `guard` holds
    pub fn when(&mut self, guard: Predicate<T, C>) -> &mut Self {
        self.guard = Guard::GuardedBy(guard);
        self
    }

    fn applies(&self, target: &T, ctx: &C) -> bool {
        match self.guard {
            Guard::Unconditional => true,
            Guard::GuardedBy(guard) => guard(target, ctx),
        }
    }

    async fn failure(
        &self,
        target: &T,
        ctx: &C,
        provider: &dyn ReferenceDataProvider,
    ) -> Option<String> {
        match &self.check {
            Check::Predicate(predicate) => {
                (!predicate(target, ctx)).then(|| self.message.to_string())
            }
            Check::Computed(compute) => compute(target, ctx),
            Check::Reference(reference) => {
                let query = (reference.query)(target, ctx);
                let response = provider.get_list(&query).await;
                let accepted = response.is_success
                    && !response.data.is_empty()
                    && (reference.accept)(target, &response.data);
                if !accepted && !response.is_success {
                    debug!(
                        rule = self.id,
                        lookup = %query.lookup(),
                        status = response.status.as_u16(),
                        errors = ?response.errors,
                        "reference lookup unsuccessful, treating value as invalid"
                    );
                }
                (!accepted).then(|| self.message.to_string())
            }
        }
    }
}

/// Ordered rules for one entity type
pub struct RuleSet<T, C> {
    name: &'static str,
    rules: Vec<Rule<T, C>>,
}

impl<T, C> RuleSet<T, C>
where
    T: Sync,
    C: Sync,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule ids in declaration order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }

    fn push(&mut self, rule: Rule<T, C>) -> &mut Rule<T, C> {
        self.rules.push(rule);
        let last = self.rules.len() - 1;
        &mut self.rules[last]
    }

    /// Fail with `message` unless `predicate` holds
    pub fn must(
        &mut self,
        id: &'static str,
        field: &'static str,
        message: &'static str,
        predicate: Predicate<T, C>,
    ) -> &mut Rule<T, C> {
        self.push(Rule {
            id,
            field,
            message,
            guard: Guard::Unconditional,
            check: Check::Predicate(predicate),
        })
    }

    /// Fail with whatever message `compute` returns
    pub fn computed(
        &mut self,
        id: &'static str,
        field: &'static str,
        compute: fn(&T, &C) -> Option<String>,
    ) -> &mut Rule<T, C> {
        self.push(Rule {
            id,
            field,
            message: "",
            guard: Guard::Unconditional,
            check: Check::Computed(compute),
        })
    }

    /// Fail with `message` unless the looked-up list accepts the value
    pub fn reference(
        &mut self,
        id: &'static str,
        field: &'static str,
        message: &'static str,
        query: fn(&T, &C) -> ReferenceQuery,
        accept: fn(&T, &ReferenceData) -> bool,
    ) -> &mut Rule<T, C> {
        self.push(Rule {
            id,
            field,
            message,
            guard: Guard::Unconditional,
            check: Check::Reference(ReferenceCheck { query, accept }),
        })
    }

    /// Evaluate every rule against `target`, reporting fields under `path`
    pub async fn evaluate(
        &self,
        target: &T,
        ctx: &C,
        provider: &dyn ReferenceDataProvider,
        path: &str,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        for rule in &self.rules {
            if !rule.applies(target, ctx) {
                result.skipped.push(SkippedRule {
                    rule: rule.id,
                    path: path.to_string(),
                });
                continue;
            }

            result.evaluated += 1;
            if let Some(message) = rule.failure(target, ctx, provider).await {
                result
                    .failures
                    .push(ValidationFailure::new(field_path(path, rule.field), message));
            }
        }

        debug!(
            rule_set = self.name,
            path,
            failures = result.failures.len(),
            skipped = result.skipped.len(),
            "rule set evaluated"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{ApiResponse, ReferenceCode};
    use async_trait::async_trait;
    use axum::http::StatusCode;

    struct Target {
        name: String,
        count: u32,
    }

    struct StaticProvider(Vec<&'static str>);

    #[async_trait]
    impl ReferenceDataProvider for StaticProvider {
        async fn get_list(&self, _query: &ReferenceQuery) -> ApiResponse<ReferenceData> {
            let codes = self.0.iter().map(|c| ReferenceCode::new(*c, "")).collect();
            ApiResponse::success(StatusCode::OK, ReferenceData::Codes(codes))
        }
    }

    fn rules() -> RuleSet<Target, ()> {
        let mut rules = RuleSet::<Target, ()>::new("target");
        rules.must("name_present", "name", "Name is missing", |t, _| {
            !t.name.is_empty()
        });
        rules.must("count_positive", "count", "Count must be positive", |t, _| {
            t.count > 0
        });
        rules
            .must("count_small", "count", "Count must be below 10", |t, _| {
                t.count < 10
            })
            .when(|t, _| t.count > 0);
        rules.computed("count_even", "count", |t, _| {
            (t.count % 2 == 1).then(|| format!("Count ({}) must be even", t.count))
        });
        rules.reference(
            "name_known",
            "name",
            "Name is invalid",
            |_, _| ReferenceQuery::organisations(""),
            |t, data| data.contains_code(&t.name),
        );
        rules
    }

    #[tokio::test]
    async fn test_collects_all_failures_in_declaration_order() {
        let target = Target {
            name: String::new(),
            count: 0,
        };
        let provider = StaticProvider(vec!["known"]);

        let result = rules().evaluate(&target, &(), &provider, "").await;

        let messages: Vec<&str> = result.failures.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Name is missing", "Count must be positive", "Name is invalid"]
        );
    }

    #[tokio::test]
    async fn test_guarded_rule_is_skipped_not_passed() {
        let target = Target {
            name: "known".to_string(),
            count: 0,
        };
        let provider = StaticProvider(vec!["known"]);

        let result = rules().evaluate(&target, &(), &provider, "item").await;

        assert!(result.was_skipped("count_small"));
        assert_eq!(result.evaluated, 4);
        assert_eq!(result.skipped[0].path, "item");
    }

    #[tokio::test]
    async fn test_computed_message_and_path_prefix() {
        let target = Target {
            name: "known".to_string(),
            count: 11,
        };
        let provider = StaticProvider(vec!["KNOWN"]);

        let result = rules().evaluate(&target, &(), &provider, "items[3]").await;

        assert_eq!(
            result.messages_for("items[3].count"),
            vec!["Count must be below 10", "Count (11) must be even"]
        );
        assert!(result.messages_for("items[3].name").is_empty());
    }

    #[tokio::test]
    async fn test_empty_reference_list_fails() {
        let target = Target {
            name: "known".to_string(),
            count: 2,
        };
        let provider = StaticProvider(vec![]);

        let result = rules().evaluate(&target, &(), &provider, "").await;

        assert_eq!(result.messages_for("name"), vec!["Name is invalid"]);
    }

    #[test]
    fn test_rule_ids_in_order() {
        assert_eq!(
            rules().rule_ids(),
            vec!["name_present", "count_positive", "count_small", "count_even", "name_known"]
        );
    }
}
