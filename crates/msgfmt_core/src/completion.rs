use crate::config::CompletionConfig;

/// Whether `text` contains any completion keyword, ignoring case.
///
/// Plain substring search: "incomplete" counts as "complete".
pub fn is_complete(text: &str, config: &CompletionConfig) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    config
        .keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
}
