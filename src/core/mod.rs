//! Core module containing the route model, errors and the validation engine

pub mod error;
pub mod route;
pub mod validation;

pub use error::{PayvalError, PayvalResult};
pub use route::{Route, RouteContext};
pub use validation::{PaymentValidator, ValidationFailure, ValidationResult};
