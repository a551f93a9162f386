//! Text finder (spec §4.3, C3): apply the pattern set to a string and yield
//! validated PANs.

use std::collections::HashSet;

use crate::luhn;
use crate::pan::Pan;
use crate::patterns::PatternSet;

/// Minimum PAN length (spec §6): AMEX's 15 digits is the floor. Text
/// payloads shorter than this are skipped without invoking a regex.
pub const MIN_PAN_LENGTH: usize = 15;

/// For each `(brand, regex)` pair, enumerate all matches in `text`; for
/// each, strip separators, validate with Luhn, reject exclusions, and
/// collect the accepted PANs in match order.
pub fn find_pans(text: &str, patterns: &PatternSet, excluded: &HashSet<String>) -> Vec<Pan> {
    if text.len() < MIN_PAN_LENGTH {
        return Vec::new();
    }

    let mut found = Vec::new();
    for (brand, regex) in patterns.brands() {
        for caps in regex.captures_iter(text) {
            let raw = &caps[1];
            let digits = luhn::strip_separators(raw);
            if !luhn::is_valid_luhn(&digits) {
                continue;
            }
            if luhn::is_excluded(&digits, excluded) {
                continue;
            }
            found.push(Pan::new(*brand, &digits));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pan::Brand;

    fn patterns() -> PatternSet {
        PatternSet::new()
    }

    #[test]
    fn scenario_s1_single_visa_pan() {
        let excluded = HashSet::new();
        let found = find_pans("4111 1111 1111 1111", &patterns(), &excluded);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].brand, Brand::Visa);
        assert_eq!(found[0].masked_value, "411111******1111");
    }

    #[test]
    fn scenario_s2_mastercard_and_amex_in_same_text() {
        let excluded = HashSet::new();
        let text = "5555-5555-5555-4444 and 378282246310005";
        let found = find_pans(text, &patterns(), &excluded);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].brand, Brand::Mastercard);
        assert_eq!(found[0].masked_value, "555555******4444");
        assert_eq!(found[1].brand, Brand::Amex);
        assert_eq!(found[1].masked_value, "378282*****0005");
    }

    #[test]
    fn scenario_s3_bad_luhn_yields_nothing() {
        let excluded = HashSet::new();
        let found = find_pans("4111 1111 1111 1112", &patterns(), &excluded);
        assert!(found.is_empty());
    }

    #[test]
    fn scenario_s4_excluded_pan_yields_nothing() {
        let mut excluded = HashSet::new();
        excluded.insert("4111111111111111".to_string());
        let found = find_pans("4111111111111111", &patterns(), &excluded);
        assert!(found.is_empty());
    }

    #[test]
    fn boundary_text_shorter_than_minimum_skips_regex_entirely() {
        let excluded = HashSet::new();
        // 13 chars, below MIN_PAN_LENGTH (15).
        let short = "4111111111111";
        assert_eq!(short.len(), 13);
        let found = find_pans(short, &patterns(), &excluded);
        assert!(found.is_empty());
    }
}
