/// Numbering scheme of an ordered list run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedStyle {
    Decimal,
    LowerAlpha,
    UpperAlpha,
}

impl OrderedStyle {
    /// Value of the `data-type` attribute on the rendered list.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderedStyle::Decimal => "decimal",
            OrderedStyle::LowerAlpha => "lower-alpha",
            OrderedStyle::UpperAlpha => "upper-alpha",
        }
    }
}

/// Kind of a list run. Two list lines merge only when their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered(OrderedStyle),
}

/// A run of same-kind list items, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<String>,
}

/// Block-level elements of a finalized message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `level` is 1 for `#`, 2 for `##`, 3 for `###`.
    Header { level: u8, text: String },
    List(List),
    Paragraph { text: String },
}
