//! Line-local formatting for messages that are still arriving.
//!
//! Called with the whole text received so far on every update. Nothing is
//! accumulated across lines: each complete line is rendered on its own and
//! the unterminated last line stays plain text until its newline arrives, so
//! a longer prefix only ever extends the markup of a shorter one.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::ListKind;
use crate::config::NormalizeConfig;
use crate::html::push_header;
use crate::inline;
use crate::parser::{LineKind, classify};

static RE_PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());

pub fn format_streaming(text: &str, config: &NormalizeConfig) -> String {
    if text.is_empty() {
        return String::new();
    }
    let last_line_complete = ends_with_line_break(text);
    let prepared = crate::prepare(text, config);

    let lines: Vec<&str> = prepared.split('\n').collect();
    let last = lines.len() - 1;
    let mut out = String::with_capacity(prepared.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if i < last || last_line_complete {
            render_line(line, &mut out);
        } else {
            out.push_str(line);
        }
    }

    let out = inline::apply_bold(&out);
    let out = inline::apply_code(&out);
    let out = inline::apply_callouts(&out);
    line_breaks(&out)
}

/// The raw text ends in a line break, ignoring trailing spaces after it.
fn ends_with_line_break(raw: &str) -> bool {
    raw.trim_end_matches(|c: char| c.is_whitespace() && c != '\n' && c != '\r')
        .ends_with(['\n', '\r'])
}

fn render_line(line: &str, out: &mut String) {
    match classify(line) {
        LineKind::Header { level, text } => push_header(level, text, out),
        LineKind::ListItem {
            kind: ListKind::Bullet,
            text,
            ..
        } => {
            out.push_str("<div class=\"list-item bullet\"><span class=\"list-bullet\">•</span> ");
            out.push_str(text);
            out.push_str("</div>");
        }
        LineKind::ListItem { marker, text, .. } => {
            out.push_str("<div class=\"list-item numbered\"><span class=\"list-number\">");
            out.push_str(marker);
            out.push_str(".</span> ");
            out.push_str(text);
            out.push_str("</div>");
        }
        LineKind::Blank | LineKind::Text(_) => out.push_str(line),
    }
}

fn line_breaks(text: &str) -> String {
    RE_PARAGRAPH_BREAK
        .replace_all(text, "<br><br>")
        .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn stream(text: &str) -> String {
        format_streaming(text, &Config::compiled_default().normalize)
    }

    /// Every opened element is closed, in order. `<br>` is void.
    fn is_balanced(markup: &str) -> bool {
        let mut stack: Vec<String> = Vec::new();
        let mut rest = markup;
        while let Some(open) = rest.find('<') {
            let Some(close) = rest[open..].find('>') else {
                return false;
            };
            let tag = &rest[open + 1..open + close];
            rest = &rest[open + close + 1..];
            if tag == "br" {
                continue;
            }
            if let Some(name) = tag.strip_prefix('/') {
                if stack.pop().as_deref() != Some(name) {
                    return false;
                }
            } else {
                let name = tag.split_whitespace().next().unwrap_or_default();
                stack.push(name.to_string());
            }
        }
        stack.is_empty()
    }

    #[test]
    fn empty_input() {
        assert_eq!(stream(""), "");
        assert_eq!(stream("  \n "), "");
    }

    #[test]
    fn unterminated_header_stays_plain() {
        assert_eq!(stream("# Jadwal"), "# Jadwal");
        assert_eq!(stream("# Jadwal\n"), "<h2 class=\"msg-header-1\">Jadwal</h2>");
    }

    #[test]
    fn list_items_render_flat_with_markers() {
        assert_eq!(
            stream("1. satu\nb) dua\n- tiga\n"),
            concat!(
                "<div class=\"list-item numbered\"><span class=\"list-number\">1.</span> satu</div><br>",
                "<div class=\"list-item numbered\"><span class=\"list-number\">b.</span> dua</div><br>",
                "<div class=\"list-item bullet\"><span class=\"list-bullet\">•</span> tiga</div>"
            )
        );
    }

    #[test]
    fn line_breaks_and_inline_rules() {
        assert_eq!(
            stream("**Halo** semua\n\npakai `kode` ya"),
            "<strong class=\"bold-text\">Halo</strong> semua<br><br>pakai <code class=\"inline-code\">kode</code> ya"
        );
    }

    #[test]
    fn no_italic_while_streaming() {
        assert_eq!(stream("*tunggu*"), "*tunggu*");
    }

    #[test]
    fn callouts_complete_as_they_arrive() {
        assert_eq!(stream("[!SUCCESS]beres"), "[!SUCCESS]beres");
        assert_eq!(
            stream("[!SUCCESS]beres[/!SUCCESS]"),
            "<span class=\"highlight-green\">beres</span>"
        );
    }

    #[test]
    fn callout_spanning_into_a_list_item_stays_literal() {
        assert_eq!(
            stream("[!TIP]bawa\n- laptop[/!TIP]\n"),
            concat!(
                "[!TIP]bawa<br>",
                "<div class=\"list-item bullet\"><span class=\"list-bullet\">•</span> laptop[/!TIP]</div>"
            )
        );
        assert_eq!(
            stream("[!NOTE]satu\ndua[/!NOTE]\n"),
            "<span class=\"highlight-blue\">satu<br>dua</span>"
        );
    }

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(stream("a <b> & c"), "a &lt;b&gt; &amp; c");
    }

    #[test]
    fn every_line_terminated_prefix_is_balanced() {
        let full = concat!(
            "# Jadwal Webinar\n\nBerikut **info** penting:\n1. Daftar di `uib.ac.id`\n",
            "2. Hadir **tepat waktu**\n\n- [!TIP]bawa laptop[/!TIP]\n- catat *poin* utama\n",
            "[!INFO]sesi dua\n## dimulai[/!INFO]\n[!WARNING]jangan\nlupa[/!WARNING]\n",
            "[!TIP]bawa\n- laptop[/!TIP]\nTerima kasih!\n"
        );
        for (i, ch) in full.char_indices() {
            if ch == '\n' {
                let prefix = &full[..=i];
                let markup = stream(prefix);
                assert!(is_balanced(&markup), "unbalanced for {:?}: {}", prefix, markup);
            }
        }
    }

    #[test]
    fn longer_prefix_extends_shorter_one() {
        let first = stream("1. satu\n2. du");
        let second = stream("1. satu\n2. dua\n");
        let settled = "<div class=\"list-item numbered\"><span class=\"list-number\">1.</span> satu</div><br>";
        assert!(first.starts_with(settled));
        assert!(second.starts_with(settled));
        assert!(first.ends_with("2. du"));
    }
}
