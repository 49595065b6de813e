// ── Core identity types ──
//
// RecordId and Percent form the foundation of every domain type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── RecordId ────────────────────────────────────────────────────────

/// Canonical identifier for any dashboard record.
///
/// Fixture ids come in several shapes ("1", "INC-2024-001", "JOB001",
/// "CR-2024-001"); they are compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Percent ─────────────────────────────────────────────────────────

/// A whole-number percentage, clamped to `0..=100` at construction.
///
/// Used for battery levels and detection confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const MAX: Self = Self(100);

    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Fraction in `0.0..=1.0`, for gauges.
    pub fn ratio(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl From<u8> for Percent {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_id_from_str() {
        let id: RecordId = "INC-2024-001".parse().unwrap();
        assert_eq!(id.as_str(), "INC-2024-001");
        assert_eq!(id.to_string(), "INC-2024-001");
    }

    #[test]
    fn record_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RecordId::from("JOB001")).unwrap();
        assert_eq!(json, "\"JOB001\"");
    }

    #[test]
    fn percent_clamps_to_hundred() {
        assert_eq!(Percent::new(150).get(), 100);
        assert_eq!(Percent::new(45).get(), 45);
    }

    #[test]
    fn percent_deserialize_clamps() {
        let p: Percent = serde_json::from_str("230").unwrap();
        assert_eq!(p, Percent::MAX);
    }

    #[test]
    fn percent_display() {
        assert_eq!(Percent::new(89).to_string(), "89%");
    }
}
