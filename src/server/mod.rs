//! HTTP surface for the validation engine
//!
//! A thin axum layer: deserialize the submission, run it through the
//! [`PaymentValidator`](crate::core::PaymentValidator), and map failures onto
//! a problem-details response.

pub mod builder;
pub mod extractor;
pub mod handlers;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use extractor::{Validatable, Validated};
pub use handlers::PaymentRequestSubmission;
pub use router::build_router;
pub use state::AppState;
