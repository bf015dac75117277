//! Whitespace and word-split repair for model-generated text.
//!
//! Upstream token boundaries do not line up with word boundaries, so text
//! arrives with spaces inside words ("Univer sitas"), words glued together
//! ("webinarUIB") and broken numbers and URLs ("1 6:00", "h ttps://").
//! Repair is best effort: the literal dictionary from [`NormalizeConfig`]
//! followed by a fixed set of structural patterns and a short-prefix join.
//!
//! Stages:
//! 1. canonical characters (line endings, NBSP, zero-width, tabs, controls),
//!    then space collapsing and space-before-punctuation removal
//! 2. glued-word splitting
//! 3. two passes of dictionary + structural repairs
//! 4. space collapsing
//! 5. line tidying (trailing space, space before punctuation, blank runs)

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::{NormalizeConfig, Repair};

const REPAIR_PASSES: usize = 2;

const ZERO_WIDTH: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

static RE_TABS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+").unwrap());

static RE_HTTP_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[hH] ?[tT] ?[tT] ?[pP]( ?[sS])? ?: ?/ ?/ ?").unwrap());

/// Template repairs for numbers, dates and addresses, applied in order.
static STRUCTURAL_REPAIRS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // "1 6:00" -> "16:00"
        (r"\b(\d) (\d):([0-5]\d)\b", "${1}${2}:${3}"),
        // "2 025" -> "2025", "202 5" -> "2025"
        (r"\b([12]) (\d{3})\b", "${1}${2}"),
        (r"\b(19|20)(\d) (\d)\b", "${1}${2}${3}"),
        // "17 / 08 / 2025" -> "17/08/2025"
        (
            r"\b(\d{1,2}) ?([/-]) ?(\d{1,2}) ?([/-]) ?(\d{2,4})\b",
            "${1}${2}${3}${4}${5}",
        ),
        // "3 ,5" -> "3,5", "1.500. 000" -> "1.500.000"
        (r"(\d) ([.,])(\d)", "${1}${2}${3}"),
        (r"(\d[.,]\d{3})([.,]) (\d{3})\b", "${1}${2}${3}"),
        // "ftp : // host" -> "ftp://host"
        (r"\b(ftp|wss?|file) ?: ?/ ?/ ?", "${1}://"),
        // "https://ui b.ac.id" -> "https://uib.ac.id"
        (r"((?:://|@) ?[\w-]+) ([\w-]+(?:\.[\w-]+)+)", "${1}${2}"),
        // "ui b.ac.id" -> "uib.ac.id"
        (r"\b([a-z]{1,3}) ([a-z]\.[a-z]{2,}\.[a-z]{2,})\b", "${1}${2}"),
        // "budi @ uib.ac.id" -> "budi@uib.ac.id"
        (r"([\w.+-]+) ?@ ?([\w-]+(?:\.[\w-]+)+)", "${1}@${2}"),
    ]
    .into_iter()
    .map(|(pattern, template)| (Regex::new(pattern).unwrap(), template))
    .collect()
});

/// Capitalized fragment of at most four letters, a single space, then a lowercase tail.
static RE_SHORT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\p{Lu}\p{Ll}{0,3}) (\p{Ll}{2,})\b").unwrap());

static RE_WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)[^\S\n]{3,}(\w)").unwrap());
static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
static RE_TRAILING_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[^\S\n]+$").unwrap());
static RE_SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+([,.;:!?])").unwrap());
static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Repair spacing and word-split artifacts. Returns `""` for empty input.
pub fn normalize(text: &str, config: &NormalizeConfig) -> String {
    if text.is_empty() {
        return String::new();
    }
    let protect = config.protect_code_spans;

    let text = canonicalize(text);
    let text = collapse_spaces(&text);
    // "1 6 :00" must look like "1 6:00" before the time repair runs
    let text = strip_space_before_punct(&text, protect);
    let text = map_outside_code(&text, protect, |segment| repair_words(segment, config));
    let text = collapse_spaces(&text);
    tidy(&text, protect)
}

fn canonicalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text: String = text
        .chars()
        .filter_map(|ch| match ch {
            '\u{00A0}' | '\u{202F}' => Some(' '),
            '\n' | '\t' => Some(ch),
            c if ZERO_WIDTH.contains(&c) || c.is_control() => None,
            c => Some(c),
        })
        .collect();
    RE_TABS.replace_all(&text, " ").into_owned()
}

fn repair_words(segment: &str, config: &NormalizeConfig) -> String {
    let mut text = split_glued_words(segment);
    for _ in 0..REPAIR_PASSES {
        text = apply_dictionary(&text, &config.repairs);
        text = apply_structural_repairs(&text);
        text = join_short_prefixes(&text, config);
    }
    text
}

/// Insert a space where a capitalized word is glued to the previous one:
/// "jadwalBatam" -> "jadwal Batam", "webinarUIB" -> "webinar UIB".
fn split_glued_words(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_uppercase() && is_glue_boundary(&chars, i) {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

fn is_glue_boundary(chars: &[char], i: usize) -> bool {
    let prev = chars[i - 1];
    let lower_run = chars[i + 1..]
        .iter()
        .take_while(|c| c.is_lowercase())
        .count();
    if is_word_char(prev) && lower_run >= 2 {
        return true;
    }

    // lowercase word followed by an acronym that ends the token
    if i >= 2 && prev.is_lowercase() && chars[i - 2].is_lowercase() {
        let upper_run = chars[i..].iter().take_while(|c| c.is_uppercase()).count();
        let after = chars.get(i + upper_run).copied();
        return upper_run >= 2 && !after.is_some_and(is_word_char);
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn apply_dictionary(text: &str, repairs: &[Repair]) -> String {
    let mut out = text.to_string();
    for repair in repairs {
        if !repair.from.is_empty() && out.contains(repair.from.as_str()) {
            out = out.replace(repair.from.as_str(), &repair.to);
        }
    }
    out
}

fn apply_structural_repairs(text: &str) -> String {
    let mut out = RE_HTTP_SCHEME
        .replace_all(text, |caps: &Captures| {
            if caps.get(1).is_some() {
                "https://"
            } else {
                "http://"
            }
        })
        .into_owned();
    for (re, template) in STRUCTURAL_REPAIRS.iter() {
        out = re.replace_all(&out, *template).into_owned();
    }
    out
}

fn join_short_prefixes(text: &str, config: &NormalizeConfig) -> String {
    RE_SHORT_PREFIX
        .replace_all(text, |caps: &Captures| {
            if config.is_join_excluded(&caps[1]) {
                caps[0].to_string()
            } else {
                format!("{}{}", &caps[1], &caps[2])
            }
        })
        .into_owned()
}

fn collapse_spaces(text: &str) -> String {
    let text = RE_WIDE_GAP.replace_all(text, "${1} ${2}");
    RE_SPACE_RUN.replace_all(&text, " ").into_owned()
}

fn tidy(text: &str, protect: bool) -> String {
    let text = RE_TRAILING_WS.replace_all(text, "");
    let text = strip_space_before_punct(&text, protect);
    let text = RE_BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn strip_space_before_punct(text: &str, protect: bool) -> String {
    map_outside_code(text, protect, |segment| {
        RE_SPACE_BEFORE_PUNCT.replace_all(segment, "${1}").into_owned()
    })
}

/// Apply `f` to everything except single-line `` `code` `` spans when `protect` is set.
fn map_outside_code(text: &str, protect: bool, f: impl Fn(&str) -> String) -> String {
    if !protect {
        return f(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        match after.find(['`', '\n']) {
            Some(close) if after[close..].starts_with('`') => {
                let end = open + 1 + close + 1;
                out.push_str(&f(&rest[..open]));
                out.push_str(&rest[open..end]);
                rest = &rest[end..];
            }
            _ => {
                // unmatched on this line, the backtick is plain text
                out.push_str(&f(&rest[..=open]));
                rest = after;
            }
        }
    }
    out.push_str(&f(rest));
    out
}
