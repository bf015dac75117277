//! Re-render a message prefix by prefix, the way a chat view does while a
//! reply is still arriving.

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let raw = if args.len() > 1 {
        std::fs::read_to_string(&args[1]).expect("Failed to read file")
    } else {
        "# Status\n1. Unggah **berkas**\n2. Tunggu [!INFO]verifikasi[/!INFO]\nProses selesai\n"
            .to_string()
    };
    let step: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(8);

    for end in prefix_ends(&raw, step) {
        let prefix = &raw[..end];
        println!("{:>4} | {}", end, msgfmt_core::format_streaming_chunk(prefix));
        if msgfmt_core::is_complete(prefix) {
            println!("     | completion signal seen");
            break;
        }
    }
}

/// Byte offsets of the growing prefixes, `step` bytes apart, rounded up to
/// char boundaries. A step of 0 is treated as 1.
fn prefix_ends(raw: &str, step: usize) -> Vec<usize> {
    let step = step.max(1);
    let mut ends = Vec::new();
    let mut end = 0;
    while end < raw.len() {
        end = (end + step).min(raw.len());
        while !raw.is_char_boundary(end) {
            end += 1;
        }
        ends.push(end);
    }
    ends
}
