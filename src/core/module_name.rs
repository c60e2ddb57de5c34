//! Module names such as `Json.Decode`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleName(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a module name: each dot-separated part must start with an uppercase letter followed by letters, digits or `_`")]
pub struct ModuleNameError(pub String);

impl ModuleName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for ModuleName {
    type Err = ModuleNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.split('.').all(valid_segment) {
            Ok(ModuleName(s.to_string()))
        } else {
            Err(ModuleNameError(s.to_string()))
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
