//! Validation and error-classification toolkit for forecourt business
//! clients.
//!
//! Two cooperating layers: a pure, declarative form validator producing at
//! most one structured error per field, and a boundary classifier that
//! normalises heterogeneous failures into a stable numeric taxonomy with
//! user-safe messages. A small account service demonstrates both layers
//! over injected storage and clock ports.
//!
//! # Examples
//! ```
//! use forecourt::domain::{common_rules, validate_form, FormData, RuleSet};
//!
//! let rules = common_rules();
//! let form = RuleSet::new()
//!     .field("email", rules.email)
//!     .field("password", rules.password);
//! let data = FormData::new()
//!     .set("email", "ada@example.com")
//!     .set("password", "Secret12");
//!
//! assert!(validate_form(&data, &form).is_valid());
//! ```

pub mod api;
pub mod domain;
pub mod outbound;
