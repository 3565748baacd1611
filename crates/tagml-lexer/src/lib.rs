//! TAGML Lexer
//!
//! Turns raw source lines into a flat stream of markup events.
//! Handles quote-sensitive character searching, backslash escaping,
//! `#` and `<!-- -->` comment stripping, and reassembly of tags or
//! quoted values that were split across physical lines.
//!
//! Because lines are merged and reflowed during preprocessing, no
//! positions are tracked; errors carry the offending literal instead.
//!
//! # Example
//!
//! ```
//! use tagml_lexer::{Event, Scanner};
//!
//! let events = Scanner::scan("<Config depth=\"3\" />").unwrap();
//! assert_eq!(events, vec![Event::Tag("Config depth=\"3\" /".into())]);
//! ```

pub mod event;
pub mod lines;
pub mod scan;
pub mod scanner;

pub use event::Event;
pub use scan::CaretMode;
pub use scanner::Scanner;

/// Scanner error carrying the literal in which the problem occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// `<` encountered while a tag is already open.
    #[error("misplaced opening '<' within \"{0}\"")]
    MisplacedOpeningCaret(String),

    /// `>` encountered while no tag is open.
    #[error("misplaced closing '>' within \"{0}\"")]
    MisplacedClosingCaret(String),

    /// A `<` with no matching `>` on the same logical line.
    #[error("could not find closing '>' within \"{0}\"")]
    MissingClosingCaret(String),

    /// The document ends with a quote or tag still open.
    #[error("input ends inside an open quote or tag: \"{0}\"")]
    Unterminated(String),
}
