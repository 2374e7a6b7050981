//! Validation outcomes

use serde::Serialize;

/// One failed rule: where, and what the submitter should fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A rule whose guard was false, so it was never evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRule {
    pub rule: &'static str,
    pub path: String,
}

/// Ordered failures from one validation pass
///
/// Failures appear in rule declaration order, with nested entities reported
/// after their parent's own rules, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub failures: Vec<ValidationFailure>,
    #[serde(skip)]
    pub skipped: Vec<SkippedRule>,
    #[serde(skip)]
    pub evaluated: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Messages reported against an exact field path
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.failures
            .iter()
            .filter(|f| f.field == field)
            .map(|f| f.message.as_str())
            .collect()
    }

    /// True if any failure carries this exact message
    pub fn has_message(&self, message: &str) -> bool {
        self.failures.iter().any(|f| f.message == message)
    }

    pub fn was_skipped(&self, rule: &str) -> bool {
        self.skipped.iter().any(|s| s.rule == rule)
    }

    /// Append another result after this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.failures.extend(other.failures);
        self.skipped.extend(other.skipped);
        self.evaluated += other.evaluated;
    }
}

/// Join an entity path and a field name; an empty field names the entity itself
pub fn field_path(prefix: &str, field: &str) -> String {
    match (prefix.is_empty(), field.is_empty()) {
        (true, _) => field.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{field}"),
    }
}

/// Path of the `index`th item of a collection field
pub fn item_path(prefix: &str, collection: &str, index: usize) -> String {
    format!("{}[{index}]", field_path(prefix, collection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path() {
        assert_eq!(field_path("", "value"), "value");
        assert_eq!(field_path("paymentRequests[0]", "value"), "paymentRequests[0].value");
        assert_eq!(field_path("paymentRequests[0]", ""), "paymentRequests[0]");
        assert_eq!(field_path("", ""), "");
    }

    #[test]
    fn test_item_path() {
        assert_eq!(item_path("", "paymentRequests", 2), "paymentRequests[2]");
        assert_eq!(
            item_path("paymentRequests[0]", "invoiceLines", 1),
            "paymentRequests[0].invoiceLines[1]"
        );
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut first = ValidationResult::new();
        first.failures.push(ValidationFailure::new("a", "one"));
        first.evaluated = 2;

        let mut second = ValidationResult::new();
        second.failures.push(ValidationFailure::new("b", "two"));
        second.evaluated = 3;

        first.merge(second);
        assert_eq!(first.failures[0].field, "a");
        assert_eq!(first.failures[1].field, "b");
        assert_eq!(first.evaluated, 5);
        assert!(!first.is_valid());
    }
}
