//! TAGML Parser
//!
//! Builds an in-memory node tree from the event stream produced by
//! `tagml-lexer`. Each node carries a type name, its attributes in
//! document order, its children in document order, and the loose text
//! that appeared directly inside it.
//!
//! The whole document is consumed in one synchronous pass; the first
//! error aborts the parse and no partial tree is returned. Errors carry
//! the offending literal but never a line number: the preprocessor
//! reflows the source, so positions are not tracked.
//!
//! # Example
//!
//! ```
//! let doc = tagml_parser::Parser::parse("<Config depth=\"3\" />").unwrap();
//! let config = doc.root().child_of_type("config").unwrap();
//! assert_eq!(config.property("DEPTH").unwrap().value, "3");
//! ```

pub mod node;
pub mod parser;
pub mod tag;

pub use node::{Document, NodeId, NodeRef, Property};
pub use parser::Parser;

use std::io;

/// Parse error carrying the literal in which the problem occurred.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Structural failure from the scanner: misplaced carets,
    /// unterminated quotes or tags.
    #[error(transparent)]
    Scan(#[from] tagml_lexer::ScanError),

    /// A tag with no type name, such as `<>`.
    #[error("empty tag \"<{0}>\"")]
    EmptyTag(String),

    /// An attribute token with no `=`.
    #[error("malformed property in \"{0}\"")]
    MalformedProperty(String),

    /// An attribute value with mismatched or unterminated quotes.
    #[error("malformed property value in \"{0}\"")]
    MalformedPropertyValue(String),

    /// A closing tag that does not match the innermost open element.
    #[error("bad closing tag \"</{tag}>\" inside element \"<{open}>\"")]
    BadClosingTag { tag: String, open: String },

    /// The input ended while this element was still open.
    #[error("element \"<{0}>\" is never closed")]
    UnterminatedElement(String),

    /// Element nesting deeper than [`parser::MAX_DEPTH`].
    #[error("element nesting exceeds {0} levels")]
    TooDeep(usize),

    /// The source file could not be read.
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}
