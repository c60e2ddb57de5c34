//! License identifiers accepted in package outlines.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// OSI approved SPDX identifiers.
const OSI_APPROVED: &[&str] = &[
    "0BSD",
    "AFL-3.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "Apache-2.0",
    "Artistic-2.0",
    "BSD-1-Clause",
    "BSD-2-Clause",
    "BSD-2-Clause-Patent",
    "BSD-3-Clause",
    "BSL-1.0",
    "CECILL-2.1",
    "ECL-2.0",
    "EFL-2.0",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.2",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "ISC",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "LPPL-1.3c",
    "MIT",
    "MIT-0",
    "MPL-2.0",
    "MS-PL",
    "MS-RL",
    "MulanPSL-2.0",
    "NCSA",
    "OFL-1.1",
    "OSL-3.0",
    "PostgreSQL",
    "UPL-1.0",
    "Unlicense",
    "Zlib",
];

/// A known SPDX license identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct License(&'static str);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{given}` is not an OSI approved SPDX license identifier")]
pub struct LicenseError {
    pub given: String,
    /// Known identifiers the author may have meant.
    pub suggestions: Vec<&'static str>,
}

impl License {
    /// The license written into new package outlines.
    pub fn bsd3() -> Self {
        License("BSD-3-Clause")
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for License {
    fn default() -> Self {
        License::bsd3()
    }
}

fn suggest(given: &str) -> Vec<&'static str> {
    let lower = given.to_ascii_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }

    OSI_APPROVED
        .iter()
        .copied()
        .filter(|id| {
            let id = id.to_ascii_lowercase();
            id == lower || id.starts_with(&lower)
        })
        .take(4)
        .collect()
}

impl FromStr for License {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OSI_APPROVED
            .iter()
            .copied()
            .find(|id| *id == s)
            .map(License)
            .ok_or_else(|| LicenseError {
                given: s.to_string(),
                suggestions: suggest(s),
            })
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_license() {
        let license: License = "MIT".parse().unwrap();
        assert_eq!(license.as_str(), "MIT");
        assert_eq!(License::default().to_string(), "BSD-3-Clause");
    }

    #[test]
    fn test_unknown_license_suggests_case_fix() {
        let err = "bsd-3-clause".parse::<License>().unwrap_err();
        assert_eq!(err.given, "bsd-3-clause");
        assert_eq!(err.suggestions, vec!["BSD-3-Clause"]);
    }

    #[test]
    fn test_unknown_license_suggests_prefix_matches() {
        let err = "gpl-3".parse::<License>().unwrap_err();
        assert_eq!(err.suggestions, vec!["GPL-3.0-only", "GPL-3.0-or-later"]);

        let err = "Proprietary".parse::<License>().unwrap_err();
        assert!(err.suggestions.is_empty());
    }
}
