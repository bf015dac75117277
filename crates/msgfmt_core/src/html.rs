use crate::block::{Block, List, ListKind};
use crate::escape::escape_html;

/// Serialize blocks to markup, one block per line.
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_block(block, &mut out);
    }

    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Header { level, text } => push_header(*level, text, out),
        Block::List(list) => emit_list(list, out),
        Block::Paragraph { text } => {
            if text.trim().is_empty() {
                return;
            }
            out.push_str("<p class=\"paragraph\">");
            out.push_str(text);
            out.push_str("</p>");
        }
    }
}

/// `#` renders as `<h2 class="msg-header-1">`, down to `###` as `<h4 class="msg-header-3">`.
pub(crate) fn push_header(level: u8, text: &str, out: &mut String) {
    let tag = level + 1;
    out.push_str(&format!("<h{tag} class=\"msg-header-{level}\">"));
    out.push_str(text);
    out.push_str(&format!("</h{tag}>"));
}

fn emit_list(list: &List, out: &mut String) {
    let close = match list.kind {
        ListKind::Bullet => {
            out.push_str("<ul class=\"bullet-list\">");
            "</ul>"
        }
        ListKind::Ordered(style) => {
            out.push_str("<ol class=\"numbered-list\" data-type=\"");
            out.push_str(style.as_str());
            out.push_str("\">");
            "</ol>"
        }
    };
    for item in &list.items {
        out.push_str("<li>");
        out.push_str(item);
        out.push_str("</li>");
    }
    out.push_str(close);
}

/// Markup for a message typed by the user: escaped text with `<br>` line breaks.
pub fn user_text_to_html(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    escape_html(&text).replace('\n', "<br>")
}
