//! Version range constraints
//!
//! Supports comparator ranges evaluated directly against `semver::Version`
//! precedence:
//! - `1.2.3` - exact match
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`, `=1.2.3`, `!=1.2.3`
//! - `>=1.2.0 <2.0.0` - space-separated comparators must all hold
//! - `>=1.0.0 <1.5.0 || >=2.0.0` - `||` alternatives
//!
//! Partial versions inside comparators are padded before parsing, and
//! comparators apply plain precedence comparison, so `>1.0.0` admits
//! `1.0.1-beta.1`.

use std::fmt;

use semver::Version;

use crate::version::error::RangeError;
use crate::version::semver::parse_sanitized;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn parse(token: &str) -> Result<Self, RangeError> {
        let (op, rest) = if let Some(rest) = token.strip_prefix(">=") {
            (Op::Gte, rest)
        } else if let Some(rest) = token.strip_prefix("<=") {
            (Op::Lte, rest)
        } else if let Some(rest) = token.strip_prefix("==") {
            (Op::Eq, rest)
        } else if let Some(rest) = token.strip_prefix("!=") {
            (Op::Ne, rest)
        } else if let Some(rest) = token.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = token.strip_prefix('<') {
            (Op::Lt, rest)
        } else if let Some(rest) = token.strip_prefix('=') {
            (Op::Eq, rest)
        } else if let Some(rest) = token.strip_prefix('!') {
            (Op::Ne, rest)
        } else {
            (Op::Eq, token)
        };

        let version = parse_sanitized(rest).map_err(|err| RangeError::Malformed {
            spec: token.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self { op, version })
    }

    fn satisfies(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => *version == self.version,
            Op::Ne => *version != self.version,
            Op::Gt => *version > self.version,
            Op::Gte => *version >= self.version,
            Op::Lt => *version < self.version,
            Op::Lte => *version <= self.version,
        }
    }
}

/// A parsed version constraint: `||`-separated alternatives, each a
/// conjunction of comparators.
#[derive(Debug, Clone)]
pub struct VersionRange {
    text: String,
    alternatives: Vec<Vec<Comparator>>,
}

impl VersionRange {
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(RangeError::Empty);
        }

        let mut alternatives = Vec::new();
        for alternative in trimmed.split("||") {
            let comparators = alternative
                .split_whitespace()
                .map(Comparator::parse)
                .collect::<Result<Vec<_>, _>>()?;
            if comparators.is_empty() {
                return Err(RangeError::Malformed {
                    spec: spec.to_string(),
                    reason: "empty alternative".to_string(),
                });
            }
            alternatives.push(comparators);
        }

        Ok(Self {
            text: trimmed.to_string(),
            alternatives,
        })
    }

    /// Tighten the range so only versions strictly above `floor` qualify.
    ///
    /// The textual form grows a `&& >floor` suffix so diagnostics show the
    /// effective constraint, derived lower bound included.
    pub fn above(mut self, floor: &Version) -> Self {
        for alternative in &mut self.alternatives {
            alternative.push(Comparator {
                op: Op::Gt,
                version: floor.clone(),
            });
        }
        self.text = format!("{} && >{}", self.text, floor);
        self
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|alternative| alternative.iter().all(|c| c.satisfies(version)))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
