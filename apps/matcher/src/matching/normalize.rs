//! Skill-string normalization shared by the taxonomy and the matcher.

/// Normalizes a raw skill string for comparison.
///
/// Lowercases, trims, drops punctuation other than `+` and `#` (so `c++`,
/// `c#` and `c` stay distinct), and collapses whitespace runs.
/// `"Node.JS"` → `"nodejs"`, `"  React  Native "` → `"react native"`.
pub fn normalize_skill(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '+' | '#'))
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a free-form string into lowercase alphanumeric tokens.
///
/// Dots and apostrophes are removed inside a token (`"B.Tech"` → `btech`,
/// `"Master's"` → `masters`); every other non-alphanumeric character separates
/// tokens.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '\'' | '’'))
        .collect::<String>()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`tokenize`], but dots inside a token are kept and only leading or
/// trailing dots are dropped: `"(B.E.) Mechanical"` → `["b.e", "mechanical"]`.
pub fn tokenize_dotted(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '.'))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
