//! Heuristic filter that separates sung lyric lines from metadata noise
//! (credit rolls, contributor footers, decorative separators).

/// Credit-role labels that prefix attribution lines like `作词：某人`.
const CREDIT_ROLES: [&str; 11] = [
    "作词", "作曲", "编曲", "制作人", "监制", "混音", "母带", "录音", "演唱", "歌手", "艺人",
];

/// Characters that make up decorative separator lines.
const SEPARATOR_CHARS: &str = "-—.*+=|[]（）(){}";

/// Decide whether a lyric line is metadata noise rather than sung content.
///
/// Returns `true` for empty lines, credit-role attributions (`作词：…`),
/// bare 2-4 character Han names, separator lines, the standalone tokens
/// `翻译`/`歌词`, and anything mentioning `贡献者`.
///
/// A real lyric that happens to be a bare 2-4 character Han sequence is
/// misclassified as noise. Known limitation of the name heuristic.
#[must_use]
pub fn is_metadata_line(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }

    if has_credit_role_prefix(text) {
        return true;
    }

    if is_bare_han_name(text) {
        return true;
    }

    if is_separator_line(text) {
        return true;
    }

    if text == "翻译" || text == "歌词" {
        return true;
    }

    if text.contains("贡献者") {
        return true;
    }

    false
}

/// Check for a `role:` or `role：` prefix with a known credit-role label.
fn has_credit_role_prefix(text: &str) -> bool {
    CREDIT_ROLES.iter().any(|role| {
        text.strip_prefix(role)
            .is_some_and(|rest| rest.starts_with(':') || rest.starts_with('：'))
    })
}

/// A standalone contributor name: 2-4 Han characters and nothing else.
fn is_bare_han_name(text: &str) -> bool {
    let count = text.chars().count();
    (2..=4).contains(&count) && text.chars().all(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}

/// Only whitespace and decorative punctuation, no sung content.
fn is_separator_line(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || SEPARATOR_CHARS.contains(c))
}
