//! Exact versions and version ranges as written in outlines.
//!
//! Outlines only use plain `MAJOR.MINOR.PATCH` versions. Ranges are written
//! as `1.0.0 <= v < 2.0.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An exact `MAJOR.MINOR.PATCH` version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("`{given}` is not a version: {reason}")]
    Syntax { given: String, reason: String },

    #[error("`{0}` has a pre-release or build suffix; only MAJOR.MINOR.PATCH is allowed")]
    NotExact(String),
}

impl Version {
    /// The toolchain release written into new outlines.
    pub const COMPILER: Version = Version::new(0, 5, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// The first release of the next major series.
    pub fn next_major(&self) -> Version {
        Version::new(self.0.major + 1, 0, 0)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = semver::Version::parse(s).map_err(|e| VersionError::Syntax {
            given: s.to_string(),
            reason: e.to_string(),
        })?;

        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(VersionError::NotExact(s.to_string()));
        }

        Ok(Version(version))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0.major, self.0.minor, self.0.patch)
    }
}

/// Comparison operator on one side of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Less,
    LessOrEqual,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Less => "<",
            Op::LessOrEqual => "<=",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Less => ordering == Ordering::Less,
            Op::LessOrEqual => ordering != Ordering::Greater,
        }
    }
}

/// A version range: `lower op v op upper`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    lower: Version,
    lower_op: Op,
    upper_op: Op,
    upper: Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("expected a range like `1.0.0 <= v < 2.0.0`")]
    Syntax,

    #[error(transparent)]
    BadVersion(#[from] VersionError),

    #[error("range `{0}` contains no versions")]
    Empty(String),
}

impl Constraint {
    /// `version <= v < next major`.
    pub fn until_next_major(version: &Version) -> Self {
        Constraint {
            lower: version.clone(),
            lower_op: Op::LessOrEqual,
            upper_op: Op::Less,
            upper: version.next_major(),
        }
    }

    /// `version <= v <= version`.
    pub fn exactly(version: &Version) -> Self {
        Constraint {
            lower: version.clone(),
            lower_op: Op::LessOrEqual,
            upper_op: Op::LessOrEqual,
            upper: version.clone(),
        }
    }

    pub fn lower(&self) -> &Version {
        &self.lower
    }

    pub fn upper(&self) -> &Version {
        &self.upper
    }

    pub fn satisfies(&self, version: &Version) -> bool {
        self.lower_op.holds(self.lower.cmp(version)) && self.upper_op.holds(version.cmp(&self.upper))
    }
}

fn parse_op(s: &str) -> Result<Op, ConstraintError> {
    match s {
        "<" => Ok(Op::Less),
        "<=" => Ok(Op::LessOrEqual),
        _ => Err(ConstraintError::Syntax),
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [lower, lower_op, "v", upper_op, upper] = parts.as_slice() else {
            return Err(ConstraintError::Syntax);
        };

        let constraint = Constraint {
            lower: lower.parse()?,
            lower_op: parse_op(lower_op)?,
            upper_op: parse_op(upper_op)?,
            upper: upper.parse()?,
        };

        let non_empty = match constraint.lower.cmp(&constraint.upper) {
            Ordering::Less => true,
            Ordering::Equal => {
                constraint.lower_op == Op::LessOrEqual && constraint.upper_op == Op::LessOrEqual
            }
            Ordering::Greater => false,
        };
        if !non_empty {
            return Err(ConstraintError::Empty(s.to_string()));
        }

        Ok(constraint)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} v {} {}",
            self.lower,
            self.lower_op.as_str(),
            self.upper_op.as_str(),
            self.upper
        )
    }
}
