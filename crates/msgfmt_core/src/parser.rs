use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, List, ListKind, OrderedStyle};

// Most specific first: "### x" must not be read as "#" + "## x".
static RE_HEADERS: LazyLock<[(u8, Regex); 3]> = LazyLock::new(|| {
    [
        (3, Regex::new(r"^###\s+(.+)$").unwrap()),
        (2, Regex::new(r"^##\s+(.+)$").unwrap()),
        (1, Regex::new(r"^#\s+(.+)$").unwrap()),
    ]
});
static RE_LETTERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z])[.)]\s+(.+)$").unwrap());
static RE_NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)[.)]\s+(.+)$").unwrap());
static RE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([•\-*])\s+(.+)$").unwrap());

/// Classification of a single line, borrowed from the trimmed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Header {
        level: u8,
        text: &'a str,
    },
    ListItem {
        kind: ListKind,
        /// The number, letter or bullet glyph in front of the item.
        marker: &'a str,
        text: &'a str,
    },
    Text(&'a str),
}

/// Classify one line. Checks run header > lettered > numbered > bullet > text
/// and the first match wins, so "A. Sentence" is always a lettered item.
pub fn classify(line: &str) -> LineKind<'_> {
    let t = line.trim();
    if t.is_empty() {
        return LineKind::Blank;
    }

    for (level, re) in RE_HEADERS.iter() {
        if let Some((_, [text])) = re.captures(t).map(|c| c.extract()) {
            return LineKind::Header {
                level: *level,
                text,
            };
        }
    }

    if let Some((_, [letter, text])) = RE_LETTERED.captures(t).map(|c| c.extract()) {
        let style = if letter.chars().all(|c| c.is_ascii_uppercase()) {
            OrderedStyle::UpperAlpha
        } else {
            OrderedStyle::LowerAlpha
        };
        return LineKind::ListItem {
            kind: ListKind::Ordered(style),
            marker: letter,
            text,
        };
    }

    if let Some((_, [number, text])) = RE_NUMBERED.captures(t).map(|c| c.extract()) {
        return LineKind::ListItem {
            kind: ListKind::Ordered(OrderedStyle::Decimal),
            marker: number,
            text,
        };
    }

    if let Some((_, [bullet, text])) = RE_BULLET.captures(t).map(|c| c.extract()) {
        return LineKind::ListItem {
            kind: ListKind::Bullet,
            marker: bullet,
            text,
        };
    }

    LineKind::Text(t)
}

/// Parser state between lines.
#[derive(Debug, PartialEq, Eq)]
enum ParseState {
    Idle,
    InList(List),
}

/// Advance the state machine by one classified line, returning the blocks it completes.
fn transition(state: ParseState, line: LineKind<'_>) -> (ParseState, Vec<Block>) {
    match line {
        LineKind::ListItem { kind, text, .. } => match state {
            ParseState::InList(mut list) if list.kind == kind => {
                list.items.push(text.to_string());
                (ParseState::InList(list), Vec::new())
            }
            other => {
                let list = List {
                    kind,
                    items: vec![text.to_string()],
                };
                (ParseState::InList(list), flush(other))
            }
        },
        LineKind::Blank => (ParseState::Idle, flush(state)),
        LineKind::Header { level, text } => {
            let mut out = flush(state);
            out.push(Block::Header {
                level,
                text: text.to_string(),
            });
            (ParseState::Idle, out)
        }
        LineKind::Text(text) => {
            let mut out = flush(state);
            out.push(Block::Paragraph {
                text: text.to_string(),
            });
            (ParseState::Idle, out)
        }
    }
}

fn flush(state: ParseState) -> Vec<Block> {
    match state {
        ParseState::InList(list) if !list.items.is_empty() => {
            log::debug!("flushing {:?} run of {} items", list.kind, list.items.len());
            vec![Block::List(list)]
        }
        _ => Vec::new(),
    }
}

/// Parse normalized, escaped text into blocks.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = ParseState::Idle;

    for line in text.lines() {
        let (next, completed) = transition(state, classify(line));
        blocks.extend(completed);
        state = next;
    }
    blocks.extend(flush(state));

    blocks
}
