// SPDX-License-Identifier: Apache-2.0

use unicode_normalization::UnicodeNormalization;

/// Comparison key for free-text organizational values: NFKC, trimmed,
/// inner whitespace collapsed, lower-cased.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    let folded: String = raw.nfkc().collect::<String>().to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::normalize_key;

    #[test]
    fn normalize_key_folds_case_space_and_width() {
        assert_eq!(normalize_key("  GIS   Analyst "), "gis analyst");
        assert_eq!(normalize_key("L001"), "l001");
        assert_eq!(normalize_key("\u{FF2C}001"), "l001");
        assert_eq!(normalize_key("   "), "");
    }
}
