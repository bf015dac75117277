use msgfmt_core::{Block, ListKind};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let raw = if args.len() > 1 {
        std::fs::read_to_string(&args[1]).expect("Failed to read file")
    } else {
        "## Jad wal\nBerikut info:\n1. Univer sitas\n2. webinarUIB\na. catatan\n- [!TIP]bawa laptop[/!TIP]"
            .to_string()
    };

    let prepared = msgfmt_core::escape(&msgfmt_core::normalize(&raw));
    let blocks = msgfmt_core::parse_blocks(&prepared);

    for block in &blocks {
        match block {
            Block::Header { level, text } => println!("H{} {}", level, text),
            Block::Paragraph { text } => println!("P  {}", text),
            Block::List(list) => {
                let kind = match list.kind {
                    ListKind::Bullet => "bullet",
                    ListKind::Ordered(style) => style.as_str(),
                };
                println!("L  {:12} {} items", kind, list.items.len());
                for item in &list.items {
                    println!("     {}", item);
                }
            }
        }
    }

    println!();
    println!("{}", msgfmt_core::format_message(&raw));
}
