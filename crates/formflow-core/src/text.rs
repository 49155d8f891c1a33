// SPDX-License-Identifier: Apache-2.0

//! Small string helpers used at the input boundary.

/// Trimmed view of `input`, or `None` when nothing but whitespace remains.
#[must_use]
pub fn non_empty_trimmed(input: &str) -> Option<&str> {
    let t = input.trim();
    (!t.is_empty()).then_some(t)
}

#[must_use]
pub fn opt_non_empty(input: Option<&str>) -> Option<String> {
    input.and_then(non_empty_trimmed).map(str::to_string)
}

/// Lower-cased, trimmed e-mail address used as a lookup key.
#[must_use]
pub fn normalize_email(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

/// Loose syntactic check: one `@`, a non-empty local part and a dotted domain.
#[must_use]
pub fn looks_like_email(input: &str) -> bool {
    let Some((local, domain)) = input.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !input.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_helpers_drop_blank_input() {
        assert_eq!(non_empty_trimmed("  x "), Some("x"));
        assert_eq!(non_empty_trimmed("   "), None);
        assert_eq!(opt_non_empty(Some(" a ")), Some("a".to_string()));
        assert_eq!(opt_non_empty(None), None);
    }

    #[test]
    fn email_checks() {
        assert_eq!(normalize_email(" Ann@Example.COM "), "ann@example.com");
        assert!(looks_like_email("a@b.io"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.io"));
        assert!(!looks_like_email("a b@c.io"));
        assert!(!looks_like_email("a@@c.io"));
    }
}
