//! Markup events.

/// One markup event produced by the [`Scanner`](crate::Scanner).
///
/// The cleaned lines flatten into an ordered stream of text runs and tag
/// literals; the tree assembler never has to re-derive tag boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A run of loose text outside any tag. Never empty.
    Text(String),

    /// The literal text strictly between one `<`/`>` pair, carets
    /// excluded. May end in `/` for a self-closing tag, or begin with
    /// `/` for a closing tag.
    Tag(String),
}
