//! Item code shape checks.
//!
//! A code is 2–5 uppercase letters followed by 2–5 digits, optionally joined
//! by `-` or `_` (`AB-123`, `AB_123`, `AB123`). Matching is unanchored: a code
//! embedded anywhere in the trimmed input is enough, so `"see AB-123 here"`
//! passes while `"a-123 extra"` does not (no uppercase run).

use once_cell::sync::Lazy;
use regex::Regex;

static CODE_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        // ABC-1234, ABC1234
        Regex::new(r"([A-Z]{2,5})-?(\d{2,5})").expect("valid code regex"),
        // ABC_1234, ABC-1234
        Regex::new(r"([A-Z]{2,5})[-_](\d{2,5})").expect("valid code regex"),
        // ABC1234
        Regex::new(r"([A-Z]{2,5})(\d{2,5})").expect("valid code regex"),
    ]
});

pub fn is_valid_code(code: &str) -> bool {
    let code = code.trim();
    CODE_PATTERNS.iter().any(|pattern| pattern.is_match(code))
}

/// Items failing [`is_valid_code`], in input order.
pub fn invalid_codes<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !is_valid_code(item.as_ref()))
        .map(|item| item.as_ref().to_string())
        .collect()
}

/// Canonical stored form of an accepted code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_three_shapes() {
        assert!(is_valid_code("AB-123"));
        assert!(is_valid_code("AB_123"));
        assert!(is_valid_code("AB123"));
        assert!(is_valid_code("ABCDE-12345"));
    }

    #[test]
    fn trims_before_matching() {
        assert!(is_valid_code("  XY-99\t"));
    }

    #[test]
    fn rejects_digits_only_and_lowercase() {
        assert!(!is_valid_code("1234"));
        assert!(!is_valid_code("ab-123"));
        assert!(!is_valid_code("A-123"));
        assert!(!is_valid_code("AB-1"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn substring_matches_are_accepted() {
        // Unanchored on purpose: any embedded code counts.
        assert!(is_valid_code("see AB-123 here"));
        assert!(is_valid_code("xxABCDEFG-123456yy"));
        assert!(is_valid_code("aAB12"));
        // No uppercase run anywhere, so nothing to match.
        assert!(!is_valid_code("a-123 extra"));
    }

    #[test]
    fn double_separator_has_no_match() {
        assert!(!is_valid_code("AB--123"));
        assert!(!is_valid_code("AB-_123"));
    }

    #[test]
    fn invalid_codes_preserves_order() {
        let items = ["AB-12", "bad", "CD_34", "1234"];
        assert_eq!(invalid_codes(&items), vec!["bad", "1234"]);
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_code("  ab-12 "), "AB-12");
    }
}
