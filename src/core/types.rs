//! Strongly-typed wrappers for card concepts
//!
//! Card names are compared constantly during evolution gating and output
//! aggregation, so they get their own type rather than a bare `String`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card name (distinct from other string types)
///
/// Names are matched exactly: `"Charmander"` and `"charmander"` are
/// different cards for prerequisite lookups and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

impl PartialEq<str> for CardName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CardName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
