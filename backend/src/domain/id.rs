//! Resource identifiers and the untrusted input they are parsed from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest integer an IEEE-754 double represents exactly (`2^53 - 1`).
pub const MAX_ID: i64 = 9_007_199_254_740_991;
const MAX_ID_F64: f64 = 9_007_199_254_740_991.0;

/// Validated identifier.
///
/// ## Invariants
/// - Strictly positive.
/// - No larger than [`MAX_ID`], so every value survives a JSON round trip.
///
/// Stores with narrower key columns treat identifiers outside their range
/// as absent; see [`EntityId::to_i32`].
///
/// # Examples
/// ```
/// use banking_backend::domain::{EntityId, IdCandidate};
///
/// let id = IdCandidate::from("42").validate().expect("valid id");
/// assert_eq!(id, EntityId::new(42).expect("positive"));
/// assert!(IdCandidate::from(3_000_000_000_i64).validate().is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EntityId(i64);

impl EntityId {
    /// Build an identifier from an integer, rejecting values outside
    /// `1..=MAX_ID`.
    pub fn new(value: i64) -> Option<Self> {
        (1..=MAX_ID).contains(&value).then_some(Self(value))
    }

    /// Identifier as carried on the wire.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Identifier narrowed to a PostgreSQL `integer` column, if it fits.
    pub fn to_i32(self) -> Option<i32> {
        i32::try_from(self.0).ok()
    }
}

impl TryFrom<i64> for EntityId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is not a valid identifier"))
    }
}

impl From<EntityId> for i64 {
    fn from(value: EntityId) -> Self {
        value.as_i64()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier input that has not been validated yet.
///
/// Candidates come from path segments, query strings and entity payloads.
/// String input is coerced numerically: surrounding whitespace is ignored,
/// blank input reads as `0` and anything unparsable reads as `NaN`. Both of
/// those fail [`IdCandidate::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdCandidate(f64);

impl IdCandidate {
    /// Raw numeric value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Validate the candidate as a positive integral identifier.
    pub fn validate(self) -> Option<EntityId> {
        let value = self.0;
        if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 || value > MAX_ID_F64 {
            return None;
        }
        // Integral and within `1..=MAX_ID`, so the cast is exact.
        EntityId::new(value as i64)
    }
}

impl From<f64> for IdCandidate {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i64> for IdCandidate {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl From<i32> for IdCandidate {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<EntityId> for IdCandidate {
    fn from(value: EntityId) -> Self {
        Self(value.0 as f64)
    }
}

impl From<&str> for IdCandidate {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self(0.0);
        }
        Self(trimmed.parse::<f64>().unwrap_or(f64::NAN))
    }
}

impl From<&String> for IdCandidate {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(IdCandidate::from(1_i64), Some(1))]
    #[case(IdCandidate::from(9999_i64), Some(9999))]
    #[case(IdCandidate::from(0_i64), None)]
    #[case(IdCandidate::from(-3_i64), None)]
    #[case(IdCandidate::from(1.5), None)]
    #[case(IdCandidate::from(f64::NAN), None)]
    #[case(IdCandidate::from(f64::INFINITY), None)]
    #[case(IdCandidate::from(i64::from(i32::MAX) + 1), Some(i64::from(i32::MAX) + 1))]
    #[case(IdCandidate::from(3_000_000_000_i64), Some(3_000_000_000))]
    #[case(IdCandidate::from(MAX_ID), Some(MAX_ID))]
    #[case(IdCandidate::from(1e16), None)]
    fn validates_numeric_candidates(#[case] candidate: IdCandidate, #[case] expected: Option<i64>) {
        assert_eq!(candidate.validate().map(EntityId::as_i64), expected);
    }

    #[rstest]
    #[case("7", Some(7))]
    #[case("  12 ", Some(12))]
    #[case("3.0", Some(3))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("abc", None)]
    #[case("2.5", None)]
    #[case("-1", None)]
    #[case("3000000000", Some(3_000_000_000))]
    fn coerces_strings(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(IdCandidate::from(raw).validate().map(EntityId::as_i64), expected);
    }

    #[rstest]
    #[case(1, Some(1))]
    #[case(i64::from(i32::MAX), Some(i32::MAX))]
    #[case(i64::from(i32::MAX) + 1, None)]
    fn narrowing_to_integer_columns(#[case] raw: i64, #[case] expected: Option<i32>) {
        let id = EntityId::new(raw).expect("valid id");
        assert_eq!(id.to_i32(), expected);
    }

    #[rstest]
    fn blank_strings_read_as_zero() {
        assert!((IdCandidate::from(" ").value()).abs() < f64::EPSILON);
        assert!(IdCandidate::from("x1").value().is_nan());
    }

    #[rstest]
    fn entity_id_rejects_non_positive_on_deserialize() {
        assert!(serde_json::from_str::<EntityId>("0").is_err());
        let id: EntityId = serde_json::from_str("5").expect("positive id");
        assert_eq!(id.as_i64(), 5);
    }
}
