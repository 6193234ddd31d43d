//! Modifier groups, options and their attachment to menu items
//!
//! [`constraints`] holds the pure cardinality and required-option rules;
//! [`ModifierService`] applies them around every write.

pub mod constraints;
pub mod service;

pub use constraints::{
    CardinalityConfig, enforce_required_has_options, normalize, validate_cardinality,
};
pub use service::ModifierService;
