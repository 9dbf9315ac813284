//! The registry of user-configurable options.
//!
//! Options are defined once in [`OptionRegistry::new`] and never change afterwards;
//! their values live in the [`Storage`](crate::fs::Storage) each option points at.

pub mod option;
pub mod registry;

pub use option::{ConfigOption, OptionKind};
pub use registry::OptionRegistry;
