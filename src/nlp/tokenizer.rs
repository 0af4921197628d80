//! Story title tokenizer
//!
//! Splits a title into lexical tokens with a single alternation of patterns.
//! At every scan position the regex engine tries the alternatives in
//! declaration order (leftmost-first), so URLs, markup fragments, arrows and
//! addresses are taken whole before the generic word pattern can split them.
//!
//! Precedence:
//! 1. URLs
//! 2. HTML tag fragments (`<br/>`, `</div>`)
//! 3. ASCII arrows (`->`, `<--`)
//! 4. Email addresses
//! 5. Words joined by apostrophes, hyphens or underscores
//! 6. Numbers with a separator (fractions, decimals, signed)
//! 7. Word-character runs
//! 8. Ellipsis runs
//! 9. Any other non-whitespace character
//!
//! Case folding, when enabled, runs before the punctuation filter, so the
//! filter always sees the token that would be emitted.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

use super::casefold::case_fold;
use super::html::decode_html_entities;

const URLS: &str = concat!(
    r"(?:https?:(?:/{1,3}|[a-z0-9%])|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,13}/)",
    r"(?:[^\s()<>{}\[\]]+|\([^\s()]*?\([^\s()]+\)[^\s()]*?\)|\([^\s]+?\))+",
    r#"(?:\([^\s()]*?\([^\s()]+\)[^\s()]*?\)|\([^\s]+?\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’])"#,
);

const HTML_TAGS: &str = r"<[^<>\s]+>";

const ASCII_ARROWS: &str = r"-+>|<-+";

const EMAILS: &str = r"[\w.+\-]+@[\w\-]+\.(?:[\w\-]\.?)+[\w\-]";

const JOINED_WORDS: &str = r"[^\W\d_](?:[^\W\d_]|['’\-_])+[^\W\d_]";

const NUMBERS: &str = r"[+\-]?\d+[,/.:\-]\d+[+\-]?";

const WORDS: &str = r"\w+";

const ELLIPSIS: &str = r"\.{2,}|…+";

const OTHER: &str = r"\S";

const PATTERNS: &[&str] = &[
    URLS,
    HTML_TAGS,
    ASCII_ARROWS,
    EMAILS,
    JOINED_WORDS,
    NUMBERS,
    WORDS,
    ELLIPSIS,
    OTHER,
];

static WORD_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    let alternation = PATTERNS
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    regex::Regex::new(&format!("(?i){alternation}")).expect("token patterns are valid")
});

/// Characters whose pure runs are dropped as noise: ASCII punctuation plus
/// typographic dashes, quotes and the ellipsis character.
pub const DEFAULT_PUNCTUATION: &str =
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~‐‑‒–—―‘’‚‛“”„‟«»‹›…";

/// Tokenizer for short, title-like strings
#[derive(Debug, Clone)]
pub struct StoryTokenizer {
    /// Keep the original casing of tokens
    preserve_case: bool,
    /// Tokens made only of these characters are dropped
    punctuation: FxHashSet<char>,
}

impl Default for StoryTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryTokenizer {
    /// Create a case-preserving tokenizer with the default punctuation filter
    pub fn new() -> Self {
        Self {
            preserve_case: true,
            punctuation: DEFAULT_PUNCTUATION.chars().collect(),
        }
    }

    /// Set whether token casing is preserved
    pub fn with_preserve_case(mut self, preserve_case: bool) -> Self {
        self.preserve_case = preserve_case;
        self
    }

    /// Replace the punctuation filter with the given characters
    pub fn with_punctuation(mut self, chars: &str) -> Self {
        self.punctuation = chars.chars().collect();
        self
    }

    /// Disable the punctuation filter entirely
    pub fn without_punctuation_filter(mut self) -> Self {
        self.punctuation.clear();
        self
    }

    pub fn preserves_case(&self) -> bool {
        self.preserve_case
    }

    /// Tokenize `text` into an ordered list of non-empty, whitespace-free tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let decoded = decode_html_entities(text);

        WORD_RE
            .find_iter(&decoded)
            .map(|m| {
                if self.preserve_case {
                    m.as_str().to_string()
                } else {
                    case_fold(m.as_str()).into_owned()
                }
            })
            .filter(|token| !self.is_artifact(token))
            .collect()
    }

    fn is_artifact(&self, token: &str) -> bool {
        !self.punctuation.is_empty() && token.chars().all(|c| self.punctuation.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        StoryTokenizer::new().tokenize(text)
    }

    #[test]
    fn test_simple_title() {
        assert_eq!(
            tokens("SICP JavaScript Version 2022 pdf"),
            vec!["SICP", "JavaScript", "Version", "2022", "pdf"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t ").is_empty());
    }

    #[test]
    fn test_punctuation_dropped() {
        assert_eq!(
            tokens("Show HN: My cool project!"),
            vec!["Show", "HN", "My", "cool", "project"]
        );
        assert_eq!(tokens("“Quoted” — title"), vec!["Quoted", "title"]);
    }

    #[test]
    fn test_joined_words_kept_whole() {
        assert_eq!(
            tokens("Here's a state-of-the-art compiler"),
            vec!["Here's", "a", "state-of-the-art", "compiler"]
        );
        assert_eq!(tokens("It’s fine"), vec!["It’s", "fine"]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokens("Rust 1.75 released"), vec!["Rust", "1.75", "released"]);
        assert_eq!(tokens("3/4 of devs"), vec!["3/4", "of", "devs"]);
        assert_eq!(tokens("-3.5 degrees"), vec!["-3.5", "degrees"]);
    }

    #[test]
    fn test_urls_kept_whole() {
        assert_eq!(
            tokens("Show HN: https://example.com/foo-bar (beta)"),
            vec!["Show", "HN", "https://example.com/foo-bar", "beta"]
        );
        assert!(tokens("see www.example.org now").contains(&"www.example.org".to_string()));
        assert!(tokens("example.com/path").contains(&"example.com/path".to_string()));
    }

    #[test]
    fn test_emails_kept_whole() {
        let toks = tokens("Mail jane.doe@example.org today");
        assert_eq!(toks, vec!["Mail", "jane.doe@example.org", "today"]);
    }

    #[test]
    fn test_html_tags() {
        assert_eq!(
            tokens("<br/> <div>this is div</div>"),
            vec!["<br/>", "<div>", "this", "is", "div", "</div>"]
        );
    }

    #[test]
    fn test_entities_decoded_before_matching() {
        assert_eq!(tokens("Tom &amp; Jerry"), vec!["Tom", "Jerry"]);
        assert_eq!(tokens("Caf&eacute; culture"), vec!["Café", "culture"]);
        assert_eq!(tokens("a&nbsp;b"), vec!["a", "b"]);
        assert_eq!(tokens("&lt;br/&gt;"), vec!["<br/>"]);
    }

    #[test]
    fn test_arrows_and_ellipsis_without_filter() {
        let tokenizer = StoryTokenizer::new().without_punctuation_filter();
        assert_eq!(tokenizer.tokenize("a -> b"), vec!["a", "->", "b"]);
        assert_eq!(tokenizer.tokenize("x <-- y"), vec!["x", "<--", "y"]);
        assert_eq!(tokenizer.tokenize("Wait... what"), vec!["Wait", "...", "what"]);
    }

    #[test]
    fn test_ellipsis_dropped_by_filter() {
        assert_eq!(tokens("Wait... what…"), vec!["Wait", "what"]);
    }

    #[test]
    fn test_lowercasing() {
        let tokenizer = StoryTokenizer::new().with_preserve_case(false);
        assert!(!tokenizer.preserves_case());
        assert_eq!(
            tokenizer.tokenize("Ask HN: What Is Rust?"),
            vec!["ask", "hn", "what", "is", "rust"]
        );
    }

    #[test]
    fn test_folding_runs_before_punctuation_filter() {
        let folded = StoryTokenizer::new()
            .with_preserve_case(false)
            .with_punctuation("abc");
        assert!(folded.tokenize("ABC abc").is_empty());

        let preserved = StoryTokenizer::new().with_punctuation("abc");
        assert_eq!(preserved.tokenize("ABC abc"), vec!["ABC"]);
    }

    #[test]
    fn test_folding_expands_sharp_s() {
        let tokenizer = StoryTokenizer::new().with_preserve_case(false);
        assert_eq!(tokenizer.tokenize("Straße STRASSE"), vec!["strasse", "strasse"]);
    }

    #[test]
    fn test_custom_punctuation() {
        let tokenizer = StoryTokenizer::new().with_punctuation("!");
        assert_eq!(tokenizer.tokenize("Wow! :)"), vec!["Wow", ":", ")"]);
    }

    #[test]
    fn test_no_empty_or_whitespace_tokens() {
        let samples = [
            "",
            "  leading and trailing  ",
            "tabs\tand\nnewlines",
            "non\u{a0}breaking&nbsp;space",
            "<a href=\"x\">link</a>",
            "Emoji 🚀 launch — “quotes” ‘single’ ...",
            "Mixed 1,000,000 users, 99.9% uptime, +5 -3",
            "weird &#xZZ; &bogus; &#129; entities",
        ];
        let tokenizer = StoryTokenizer::new().without_punctuation_filter();
        for sample in samples {
            for token in tokenizer.tokenize(sample).iter().chain(tokens(sample).iter()) {
                assert!(!token.is_empty(), "empty token from {sample:?}");
                assert!(
                    !token.chars().any(char::is_whitespace),
                    "whitespace in {token:?} from {sample:?}"
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let title = "This week in KDE: You wanted stability? Here's some stability";
        assert_eq!(tokens(title), tokens(title));
    }

    #[test]
    fn test_retokenizing_joined_output_is_stable() {
        let title = "Show HN: A tiny   Lisp in 200 lines — written in C";
        let first = tokens(title);
        let second = tokens(&first.join(" "));
        assert_eq!(first, second);
    }
}
