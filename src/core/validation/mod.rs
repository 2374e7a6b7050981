//! Declarative validation of payment submissions
//!
//! [`engine`] evaluates ordered rule sets, [`rules`] declares the rule sets
//! for each entity, and [`PaymentValidator`] composes them over a batch.

pub mod engine;
pub mod result;
pub mod rules;
pub mod validator;
pub mod validators;

pub use engine::{Check, Guard, Predicate, ReferenceCheck, Rule, RuleSet};
pub use result::{SkippedRule, ValidationFailure, ValidationResult, field_path, item_path};
pub use validator::PaymentValidator;
