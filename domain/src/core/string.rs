//! String utilities for the domain layer.

const ELLIPSIS: &str = "...";

/// Truncate a string to at most `max_chars` characters, ending in `...`
/// when anything was cut and there is room for it.
///
/// Counts Unicode scalar values rather than bytes, so the result never
/// splits a character and never exceeds `max_chars` characters.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars < ELLIPSIS.len() {
        return s.chars().take(max_chars).collect();
    }
    let keep = max_chars - ELLIPSIS.len();
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_exact_length_untouched() {
        assert_eq!(truncate("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        // 6 characters, 18 bytes
        let s = "あいうえおか";
        assert_eq!(truncate(s, 6), s);
        assert_eq!(truncate(s, 5), "あい...");
        assert_eq!(truncate(s, 5).chars().count(), 5);
    }

    #[test]
    fn test_truncate_bound_holds_for_long_input() {
        let long = "x".repeat(2_000);
        let cut = truncate(&long, 500);
        assert_eq!(cut.chars().count(), 500);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_below_ellipsis_width() {
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("hello", 0), "");
        assert_eq!(truncate("hello", 3), "...");
    }
}
