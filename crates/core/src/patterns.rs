//! Pattern set (spec §4.1, C1): the three brand regexes, compiled once.

use regex::Regex;
use std::sync::LazyLock;

use crate::pan::Brand;

/// An ordered, immutable list of `(brand, compiled regex)` pairs. Brand
/// order matters: spec §4.2's tie-break picks the first brand in list
/// order when two regexes could match the same substring.
#[derive(Clone)]
pub struct PatternSet {
    brands: Vec<(Brand, &'static Regex)>,
}

static MASTERCARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mu)(?:\D|^)(5[1-5][0-9]{2}(?: |-|)[0-9]{4}(?: |-|)[0-9]{4}(?: |-|)[0-9]{4})(?:\D|$)")
        .expect("mastercard pattern is valid")
});

static VISA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mu)(?:\D|^)(4[0-9]{3}(?: |-|)[0-9]{4}(?: |-|)[0-9]{4}(?: |-|)[0-9]{4})(?:\D|$)")
        .expect("visa pattern is valid")
});

static AMEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mu)(?:\D|^)((?:34|37)[0-9]{2}(?: |-|)[0-9]{6}(?: |-|)[0-9]{5})(?:\D|$)")
        .expect("amex pattern is valid")
});

impl PatternSet {
    /// Brand order: Mastercard, Visa, AMEX — matching the original's
    /// list order, which is the tie-break priority spec §4.2 depends on.
    pub fn new() -> Self {
        PatternSet {
            brands: vec![
                (Brand::Mastercard, &*MASTERCARD_RE),
                (Brand::Visa, &*VISA_RE),
                (Brand::Amex, &*AMEX_RE),
            ],
        }
    }

    pub fn brands(&self) -> &[(Brand, &'static Regex)] {
        &self.brands
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visa_pattern_matches_spaced_pan() {
        let set = PatternSet::new();
        let (_, re) = set.brands().iter().find(|(b, _)| *b == Brand::Visa).unwrap();
        let caps = re.captures("card: 4111 1111 1111 1111 end").unwrap();
        assert_eq!(&caps[1], "4111 1111 1111 1111");
    }

    #[test]
    fn amex_pattern_matches_grouped_4_6_5() {
        let set = PatternSet::new();
        let (_, re) = set.brands().iter().find(|(b, _)| *b == Brand::Amex).unwrap();
        let caps = re.captures("378282246310005").unwrap();
        assert_eq!(&caps[1], "378282246310005");
    }
}
