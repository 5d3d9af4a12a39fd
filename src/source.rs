//! Source text handling
//!
//! A [`SourceFile`] owns the display name and the full text of one compilation
//! unit. The lexer and parser borrow it, and every [`Error`] is built through
//! it so that diagnostics can quote the offending line.

use crate::error::{Error, ErrorKind};
use crate::parser::ast::SourceLocation;

/// One unit of rath source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Display name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the full line of text containing `offset`, without its line
    /// terminator.
    pub fn line_text(&self, offset: usize) -> &str {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let start = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[offset..]
            .find('\n')
            .map_or(self.text.len(), |i| offset + i);

        self.text[start..end].trim_end_matches('\r')
    }

    /// Builds a diagnostic anchored at `location`.
    pub fn error(
        &self,
        kind: ErrorKind,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Error {
        Error {
            kind,
            message: message.into(),
            filename: self.name.clone(),
            line: location.line,
            offset: location.offset,
            line_text: self.line_text(location.offset).to_string(),
        }
    }
}
