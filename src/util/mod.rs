//! Shared utilities

pub mod binary;
pub mod config;
pub mod diagnostic;
pub mod fs;

pub use config::Config;
pub use diagnostic::{Diagnostic, OutlineReport};
pub use fs::{FileSystem, RealFs};
