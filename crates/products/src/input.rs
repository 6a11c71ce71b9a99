//! Coercion of raw control values into typed criteria.
//!
//! Nothing here fails: a value that cannot be understood leaves its
//! dimension unconstrained.

use crate::sort::SortKey;

/// Select value meaning "no constraint" for category and rating.
pub const ALL_OPTION: &str = "all";

/// Category select options as `(value, label)`.
pub const CATEGORY_OPTIONS: [(&str, &str); 5] = [
    (ALL_OPTION, "All"),
    ("electronics", "Electronics"),
    ("women's clothing", "Women's Clothing"),
    ("jewelery", "Jewelery"),
    ("men's clothing", "Men's Clothing"),
];

/// Rating bucket select options as `(value, label)`.
pub const RATING_OPTIONS: [(&str, &str); 5] = [
    (ALL_OPTION, "All"),
    ("1-1.9", "1+"),
    ("2-2.9", "2+"),
    ("3-3.9", "3+"),
    ("4-4.9", "4+"),
];

/// Price ceiling from a numeric text input.
///
/// Any finite number is kept, negative ones included: a ceiling below zero
/// is a real constraint that no product satisfies.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Category from the select. `"all"` and blank mean any category.
pub fn parse_category(raw: &str) -> Option<String> {
    if raw.is_empty() || raw == ALL_OPTION {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Minimum rating from a bucket value such as `"3-3.9"`.
///
/// The leading decimal number is the lower bound of the bucket.
pub fn parse_rating_bucket(raw: &str) -> Option<f64> {
    leading_number(raw.trim()).filter(|v| v.is_finite())
}

/// Sort key from the select; unknown values sort nothing.
pub fn parse_sort_key(raw: &str) -> Option<SortKey> {
    raw.parse().ok()
}

fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        } else if has_digits {
            end = frac_start;
        }
    }

    if !has_digits {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_plain_numbers() {
        assert_eq!(parse_price("25"), Some(25.0));
        assert_eq!(parse_price(" 19.99 "), Some(19.99));
        assert_eq!(parse_price("0"), Some(0.0));
    }

    #[test]
    fn price_rejects_garbage_and_non_finite_values() {
        for raw in ["", "   ", "abc", "12abc", "NaN", "inf", "-inf"] {
            assert_eq!(parse_price(raw), None, "input {raw:?}");
        }
    }

    #[test]
    fn negative_price_is_kept_as_a_ceiling() {
        assert_eq!(parse_price("-1"), Some(-1.0));
        assert_eq!(parse_price(" -0.5 "), Some(-0.5));
    }

    #[test]
    fn category_all_means_unset() {
        assert_eq!(parse_category("all"), None);
        assert_eq!(parse_category(""), None);
        assert_eq!(parse_category("jewelery"), Some("jewelery".to_string()));
        assert_eq!(parse_category("women's clothing"), Some("women's clothing".to_string()));
    }

    #[test]
    fn rating_buckets_use_their_lower_bound() {
        let parsed: Vec<Option<f64>> =
            RATING_OPTIONS.iter().map(|(value, _)| parse_rating_bucket(value)).collect();
        assert_eq!(parsed, vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn rating_accepts_fractional_prefixes() {
        assert_eq!(parse_rating_bucket("3.5-4"), Some(3.5));
        assert_eq!(parse_rating_bucket(".5"), Some(0.5));
        assert_eq!(parse_rating_bucket("4."), Some(4.0));
        assert_eq!(parse_rating_bucket(""), None);
        assert_eq!(parse_rating_bucket("-"), None);
        assert_eq!(parse_rating_bucket("."), None);
    }

    #[test]
    fn sort_values_from_the_select() {
        assert_eq!(parse_sort_key("price_desc"), Some(SortKey::PriceDescending));
        assert_eq!(parse_sort_key("rating-asc"), Some(SortKey::RatingAscending));
        assert_eq!(parse_sort_key("popularity"), None);
    }

    #[test]
    fn every_category_option_other_than_all_is_a_constraint() {
        let constrained = CATEGORY_OPTIONS
            .iter()
            .filter(|(value, _)| parse_category(value).is_some())
            .count();
        assert_eq!(constrained, CATEGORY_OPTIONS.len() - 1);
    }
}
