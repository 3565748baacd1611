//! TAGML source scanner.
//!
//! Cleans raw lines through the [`lines`] preprocessor and splits each
//! balanced logical line into [`Event`]s: loose text runs and tag
//! literals. Remaining text after a `>` is scanned in place, so several
//! tags on one physical line come out as consecutive events.

use crate::event::Event;
use crate::lines;
use crate::scan::{self, CaretMode};
use crate::ScanError;

/// Markup scanner producing a flat event stream.
pub struct Scanner {
    events: Vec<Event>,
}

impl Scanner {
    /// Scan a whole source text.
    pub fn scan(source: &str) -> Result<Vec<Event>, ScanError> {
        let lines: Vec<String> = source.lines().map(str::to_string).collect();
        Self::scan_lines(&lines)
    }

    /// Scan an ordered sequence of raw lines, exactly as read from a file.
    pub fn scan_lines(raw: &[String]) -> Result<Vec<Event>, ScanError> {
        let clean = lines::clean(raw)?;

        let mut scanner = Scanner { events: Vec::new() };
        for line in &clean {
            scanner.scan_line(line)?;
        }
        Ok(scanner.events)
    }

    /// Split one balanced logical line into events.
    fn scan_line(&mut self, line: &str) -> Result<(), ScanError> {
        let mut pos = 0;

        while pos < line.len() {
            let Some(open) = scan::find_unquoted(line, '<', pos, CaretMode::Validate)? else {
                // No tag on the rest of this line: all of it is loose text.
                self.push_text(&line[pos..]);
                break;
            };

            let close = scan::find_unquoted(line, '>', open, CaretMode::Validate)?
                .ok_or_else(|| ScanError::MissingClosingCaret(line.to_string()))?;

            self.push_text(&line[pos..open]);
            self.events.push(Event::Tag(line[open + 1..close].to_string()));
            pos = close + 1;
        }

        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.events.push(Event::Text(text.to_string()));
        }
    }
}
