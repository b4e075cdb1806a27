//! Transport-facing payload shapes.
//!
//! The crate owns no wire protocol; these types describe the JSON envelope
//! the surrounding HTTP layer already exchanges.

pub mod envelope;

pub use self::envelope::{ApiResponse, EnvelopeValidationError};
