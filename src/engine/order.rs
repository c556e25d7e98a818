//! Comparators used to build the display index.
//!
//! Both comparators are total orders, which `slice::sort_by` requires. Stable
//! sorting over the insertion order makes insertion order the tiebreak.

use crate::domain::{CellValue, MissingKeyPolicy};
use std::cmp::Ordering;

/// Compares two cached sort keys.
///
/// With [`MissingKeyPolicy::Last`] a missing key orders after every present
/// key regardless of `descending`.
#[must_use]
pub fn compare_keys(
    a: Option<f64>,
    b: Option<f64>,
    policy: MissingKeyPolicy,
    descending: bool,
) -> Ordering {
    let directed = |ordering: Ordering| if descending { ordering.reverse() } else { ordering };

    match policy {
        MissingKeyPolicy::Zero => directed(a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0))),
        MissingKeyPolicy::Last => match (a, b) {
            (Some(a), Some(b)) => directed(a.total_cmp(&b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Compares two raw cells of an untyped column.
///
/// Two numeric cells compare numerically and two non-numeric cells compare by
/// display form. A mixed numeric/non-numeric pair is the exception: it does
/// not fall back to display form. The numeric cell orders first, which keeps
/// mixed columns a total order.
#[must_use]
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_sort_last_both_ways() {
        let policy = MissingKeyPolicy::Last;
        assert_eq!(compare_keys(None, Some(-5.0), policy, false), Ordering::Greater);
        assert_eq!(compare_keys(None, Some(-5.0), policy, true), Ordering::Greater);
        assert_eq!(compare_keys(Some(1.0), Some(2.0), policy, true), Ordering::Greater);
    }

    #[test]
    fn zero_policy_treats_missing_as_zero() {
        let policy = MissingKeyPolicy::Zero;
        assert_eq!(compare_keys(None, Some(-5.0), policy, false), Ordering::Greater);
        assert_eq!(compare_keys(None, Some(5.0), policy, false), Ordering::Less);
        assert_eq!(compare_keys(None, Some(0.0), policy, false), Ordering::Equal);
    }

    #[test]
    fn numeric_text_compares_by_value() {
        assert_eq!(
            compare_cells(&CellValue::from("9"), &CellValue::from("10")),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::from("b"), &CellValue::from("a")),
            Ordering::Greater
        );
        assert_eq!(
            compare_cells(&CellValue::from("10"), &CellValue::from("10a")),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_cells_put_numbers_first() {
        // "10a" < "9" by display form, but the numeric cell still leads.
        assert_eq!(
            compare_cells(&CellValue::from("9"), &CellValue::from("10a")),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::Null, &CellValue::Number(-1.0)),
            Ordering::Greater
        );
    }
}
