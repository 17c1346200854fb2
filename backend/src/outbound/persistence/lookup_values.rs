//! Parsing of unique-key lookup values for typed columns.
//!
//! Lookup values arrive as query-string text. A value that cannot be
//! represented in the column type matches no row.

use crate::domain::EntityId;

/// Integer column value; accepts integral decimals such as `5.0`.
pub(super) fn integer(value: &str) -> Option<i32> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if parsed.fract() != 0.0 || parsed < f64::from(i32::MIN) || parsed > f64::from(i32::MAX) {
        return None;
    }
    // Range and integrality checked above.
    Some(parsed as i32)
}

/// Floating-point column value.
pub(super) fn float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Identifier narrowed to a 32-bit primary key; ids beyond the column's
/// range match no row.
pub(super) fn primary_key(id: EntityId) -> Option<i32> {
    id.to_i32()
}

/// Domain integer narrowed to a 32-bit foreign key.
pub(super) fn reference(value: i64) -> Option<i32> {
    i32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(7, Some(7))]
    #[case(i64::from(i32::MAX), Some(i32::MAX))]
    #[case(3_000_000_000, None)]
    fn primary_keys_fit_the_column(#[case] raw: i64, #[case] expected: Option<i32>) {
        let id = EntityId::new(raw).expect("valid id");
        assert_eq!(primary_key(id), expected);
    }

    #[rstest]
    #[case("5", Some(5))]
    #[case(" 5.0 ", Some(5))]
    #[case("5.5", None)]
    #[case("four", None)]
    #[case("", None)]
    #[case("3000000000", None)]
    fn integer_values(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(integer(raw), expected);
    }

    #[rstest]
    #[case("526", Some(526.0))]
    #[case("216.12", Some(216.12))]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn float_values(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(float(raw), expected);
    }

    #[rstest]
    fn references_must_fit_the_column() {
        assert_eq!(reference(7), Some(7));
        assert_eq!(reference(i64::from(i32::MAX) + 1), None);
    }
}
