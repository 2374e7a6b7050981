//! Rule sets for each entity in a submission
//!
//! Rule order within a set is the order failures are reported in.

pub mod batch;
pub mod invoice_line;
pub mod payment_request;

pub use batch::batch_rules;
pub use invoice_line::invoice_line_rules;
pub use payment_request::payment_request_rules;
