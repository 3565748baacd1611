//! Tree assembler.
//!
//! Drives recursive descent over the flat event stream from
//! `tagml-lexer`, building a [`Document`]. One cursor is shared across
//! all recursive invocations: text runs append to the current parent's
//! loose inner text, opening tags create children, self-closing tags stay
//! at the same nesting level, and a closing tag that matches the current
//! parent ascends one level. The first error aborts the whole parse.

use crate::node::{Document, NodeId};
use crate::tag;
use crate::ParseError;
use std::path::Path;
use tagml_lexer::{Event, Scanner};

/// Maximum element nesting depth. Recursion depth tracks document
/// nesting, so the bound keeps pathological documents off the call stack.
pub const MAX_DEPTH: usize = 64;

/// Recursive-descent driver over the markup event stream.
pub struct Parser {
    events: Vec<Event>,
    pos: usize,
}

impl Parser {
    /// Parse a whole source text into a document tree.
    pub fn parse(source: &str) -> Result<Document, ParseError> {
        Self::run(Scanner::scan(source)?)
    }

    /// Parse an ordered sequence of raw lines, exactly as read from a
    /// file.
    pub fn parse_lines(lines: &[String]) -> Result<Document, ParseError> {
        Self::run(Scanner::scan_lines(lines)?)
    }

    /// Read a file and parse its contents. A read failure is surfaced as
    /// a [`ParseError::Io`] wrapping the underlying cause.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, ParseError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&source)
    }

    fn run(events: Vec<Event>) -> Result<Document, ParseError> {
        let mut parser = Parser { events, pos: 0 };
        let mut doc = Document::new();
        let root = doc.root().id();

        parser.parse_inner(&mut doc, root, 0)?;
        Ok(doc)
    }

    /// Consume events as the contents of `parent`, until its closing tag
    /// (or, for the root, the end of input).
    fn parse_inner(
        &mut self,
        doc: &mut Document,
        parent: NodeId,
        depth: usize,
    ) -> Result<(), ParseError> {
        while let Some(event) = self.peek() {
            match event {
                Event::Text(text) => {
                    let text = text.clone();
                    doc.append_loose_inner(parent, &text);
                    self.advance();
                }
                Event::Tag(inner) => {
                    let header = tag::parse_tag(inner)?;

                    if let Some(closed) = header.name.strip_prefix('/') {
                        // A closing tag either closes the current parent
                        // or the document is malformed.
                        if closed.eq_ignore_ascii_case(doc.type_name(parent)) {
                            self.advance();
                            return Ok(());
                        }
                        return Err(ParseError::BadClosingTag {
                            tag: closed.to_string(),
                            open: doc.type_name(parent).to_string(),
                        });
                    }

                    if depth >= MAX_DEPTH {
                        return Err(ParseError::TooDeep(MAX_DEPTH));
                    }

                    let child = doc.add_child(parent, header.name);
                    for property in header.properties {
                        doc.add_property(child, property);
                    }

                    self.advance();
                    if !header.self_closing {
                        self.parse_inner(doc, child, depth + 1)?;
                    }
                }
            }
        }

        // Out of input: only the root may still be open here.
        if doc.get(parent).parent().is_some() {
            return Err(ParseError::UnterminatedElement(
                doc.type_name(parent).to_string(),
            ));
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Event> {
        self.events.get(self.pos)
    }

    fn advance(&mut self) {
        if self.pos < self.events.len() {
            self.pos += 1;
        }
    }
}
