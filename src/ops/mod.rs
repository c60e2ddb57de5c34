//! High-level operations.
//!
//! This module contains the implementation of gren-outline commands.

pub mod format;
pub mod load;
pub mod outline_new;
pub mod validate;

pub use format::{format_outline, FormatOutcome};
pub use load::{load, parse_and_validate, LoadError};
pub use outline_new::{init_project, NewOptions};
pub use validate::validate;
