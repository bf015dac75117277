//! Inline rewrites over already-escaped markup: **bold**, *italic*, `code`
//! and `[!TAG]…[/!TAG]` callouts.
//!
//! Emphasis and code spans never contain `<` or `>`, so they cannot open
//! inside one element and close inside the next. Callouts may contain
//! markup, but only markup that is balanced on its own.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^\n<>]*?)\*\*").unwrap());
static RE_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n<>]+)\*").unwrap());
static RE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n<>]+)`").unwrap());

static RE_CALLOUTS: LazyLock<Vec<(Callout, Regex)>> = LazyLock::new(|| {
    Callout::ALL
        .iter()
        .map(|&callout| {
            let tag = callout.tag();
            let pattern = format!(r"(?s)\[!{tag}\](.*?)\[/!{tag}\]");
            (callout, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Visual severity of a callout span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Severity {
    pub fn class(self) -> &'static str {
        match self {
            Severity::Red => "highlight-red",
            Severity::Yellow => "highlight-yellow",
            Severity::Green => "highlight-green",
            Severity::Blue => "highlight-blue",
        }
    }
}

/// Named callout tags, in the order they are rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callout {
    Important,
    Error,
    Warning,
    Success,
    Tip,
    Info,
    Note,
}

impl Callout {
    pub const ALL: [Callout; 7] = [
        Callout::Important,
        Callout::Error,
        Callout::Warning,
        Callout::Success,
        Callout::Tip,
        Callout::Info,
        Callout::Note,
    ];

    /// Tag name as written between `[!` and `]`. Matching is case-sensitive.
    pub fn tag(self) -> &'static str {
        match self {
            Callout::Important => "IMPORTANT",
            Callout::Error => "ERROR",
            Callout::Warning => "WARNING",
            Callout::Success => "SUCCESS",
            Callout::Tip => "TIP",
            Callout::Info => "INFO",
            Callout::Note => "NOTE",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Callout::Important | Callout::Error => Severity::Red,
            Callout::Warning => Severity::Yellow,
            Callout::Success | Callout::Tip => Severity::Green,
            Callout::Info | Callout::Note => Severity::Blue,
        }
    }
}

/// All inline rewrites of a finalized message, in order.
pub fn apply_inline(markup: &str) -> String {
    let out = apply_bold(markup);
    let out = apply_italic(&out);
    let out = apply_code(&out);
    apply_callouts(&out)
}

pub fn apply_bold(text: &str) -> String {
    RE_BOLD
        .replace_all(text, r#"<strong class="bold-text">${1}</strong>"#)
        .into_owned()
}

/// Single-star emphasis. A match touching another `*` belongs to an
/// unmatched `**` marker and is left as written.
pub fn apply_italic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in RE_ITALIC.captures_iter(text) {
        let m = caps.get_match();
        let (_, [inner]) = caps.extract();
        out.push_str(&text[last..m.start()]);
        if text[..m.start()].ends_with('*') || text[m.end()..].starts_with('*') {
            out.push_str(m.as_str());
        } else {
            let _ = write!(out, r#"<em class="italic-text">{inner}</em>"#);
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

pub fn apply_code(text: &str) -> String {
    RE_CODE
        .replace_all(text, r#"<code class="inline-code">${1}</code>"#)
        .into_owned()
}

/// Rewrite each callout pair, non-greedy and left to right. Spans may cross
/// line breaks; nested pairs are not special-cased. A pair whose body would
/// close or leave open an enclosing element stays literal.
pub fn apply_callouts(text: &str) -> String {
    let mut out = text.to_string();
    for (callout, re) in RE_CALLOUTS.iter() {
        let class = callout.severity().class();
        out = re
            .replace_all(&out, |caps: &Captures| {
                let body = &caps[1];
                if is_balanced_fragment(body) {
                    format!(r#"<span class="{class}">{body}</span>"#)
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
    }
    out
}

/// Every tag opened in `markup` is closed in it, in order. `<br>` is void.
fn is_balanced_fragment(markup: &str) -> bool {
    let mut open: Vec<&str> = Vec::new();
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            return false;
        };
        let tag = &rest[start + 1..start + len];
        rest = &rest[start + len + 1..];
        if tag == "br" {
            continue;
        }
        match tag.strip_prefix('/') {
            Some(name) => {
                if open.pop() != Some(name) {
                    return false;
                }
            }
            None => open.push(tag.split_whitespace().next().unwrap_or_default()),
        }
    }
    open.is_empty()
}
