//! Case folding
//!
//! Lowercasing plus the full-folding expansions that matter for Latin and
//! Greek titles: `ß`/`ẞ` fold to `ss`, final sigma to `σ`, long s to `s`.
//! Every case-insensitive comparison in the crate goes through [`case_fold`].

use std::borrow::Cow;

/// Fold `text` for caseless comparison
pub fn case_fold(text: &str) -> Cow<'_, str> {
    let needs_fold = text
        .chars()
        .any(|c| c.is_uppercase() || matches!(c, 'ß' | 'ς' | 'ſ'));
    if !needs_fold {
        return Cow::Borrowed(text);
    }

    let mut folded = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        match c {
            'ß' => folded.push_str("ss"),
            'ς' => folded.push('σ'),
            'ſ' => folded.push('s'),
            other => folded.push(other),
        }
    }
    Cow::Owned(folded)
}
