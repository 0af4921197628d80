//! Title-level casing checks

use std::sync::LazyLock;

use regex::Regex;

static UPPERCASE_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-z]*$").expect("uppercase title pattern is valid"));

static UPPERCASE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,}").expect("uppercase run pattern is valid"));

/// A title is uppercase when it contains no lowercase ASCII letter.
///
/// Digits, punctuation and non-ASCII letters do not disqualify it.
pub fn is_uppercase_title(title: &str) -> bool {
    UPPERCASE_TITLE_RE.is_match(title)
}

/// Runs of two or more consecutive uppercase ASCII letters.
pub fn uppercase_runs(title: &str) -> impl Iterator<Item = &str> + '_ {
    UPPERCASE_RUN_RE.find_iter(title).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_title() {
        assert!(is_uppercase_title("THIS IS A TEST TITLE 2 !!"));
        assert!(is_uppercase_title("SHOW HN: MY COOL PROJECT"));
        assert!(is_uppercase_title("ÉTÉ 2024"));
        assert!(is_uppercase_title(""));
        assert!(!is_uppercase_title("This week in KDE"));
        assert!(!is_uppercase_title("NASA's new rover"));
    }

    #[test]
    fn test_uppercase_runs() {
        let title = "This week in KDE: You wanted stability? Here's some stability";
        assert_eq!(uppercase_runs(title).collect::<Vec<_>>(), vec!["KDE"]);

        let title = "AWS and GCP outage hits I/O";
        assert_eq!(uppercase_runs(title).collect::<Vec<_>>(), vec!["AWS", "GCP"]);
        assert_eq!(uppercase_runs("A I").count(), 0);
    }
}
