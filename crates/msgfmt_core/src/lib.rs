mod block;
mod completion;
mod config;
mod error;
mod escape;
mod html;
mod inline;
mod normalize;
mod parser;
mod streaming;

pub use block::{Block, List, ListKind, OrderedStyle};
pub use config::{CompletionConfig, Config, NormalizeConfig, Repair};
pub use error::ConfigError;
pub use inline::{Callout, Severity, apply_inline};
pub use parser::{LineKind, classify};

/// Normalize then escape: the shared front half of both formatters.
pub(crate) fn prepare(text: &str, config: &NormalizeConfig) -> String {
    escape::escape_html(&normalize::normalize(text, config))
}

/// Escape `&`, `<` and `>` as named entities.
pub fn escape(text: &str) -> String {
    escape::escape_html(text)
}

/// Repair spacing and word-split artifacts using the default config.
pub fn normalize(text: &str) -> String {
    normalize_with_config(text, Config::compiled_default())
}

/// Repair spacing and word-split artifacts with custom config.
pub fn normalize_with_config(text: &str, config: &Config) -> String {
    normalize::normalize(text, &config.normalize)
}

/// Parse normalized, escaped text into blocks.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    parser::parse(text)
}

/// Format a finalized bot message using default config.
pub fn format_message(text: &str) -> String {
    format_message_with_config(text, Config::compiled_default())
}

/// Format a finalized bot message with custom config.
pub fn format_message_with_config(text: &str, config: &Config) -> String {
    if text.is_empty() {
        return String::new();
    }
    let blocks = parse_blocks(&prepare(text, &config.normalize));
    log::debug!("formatting message: {} blocks", blocks.len());
    apply_inline(&html::blocks_to_html(&blocks))
}

/// Format the text received so far of a message that is still streaming.
pub fn format_streaming_chunk(text: &str) -> String {
    format_streaming_chunk_with_config(text, Config::compiled_default())
}

/// Format a streaming message prefix with custom config.
pub fn format_streaming_chunk_with_config(text: &str, config: &Config) -> String {
    streaming::format_streaming(text, &config.normalize)
}

/// Format a message typed by the user.
pub fn format_user_message(text: &str) -> String {
    html::user_text_to_html(text)
}

/// Whether the text reads like a completion signal, using default keywords.
pub fn is_complete(text: &str) -> bool {
    is_complete_with_config(text, Config::compiled_default())
}

/// Whether the text reads like a completion signal, using custom keywords.
pub fn is_complete_with_config(text: &str, config: &Config) -> bool {
    completion::is_complete(text, &config.completion)
}
