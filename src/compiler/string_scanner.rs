use std::{iter::Peekable, str::Chars};

use super::source_location::SourceLocation;

/// Character cursor over rule source. Tracks the line/column of the most
/// recently consumed character so syntax errors can point at it; peeking
/// never advances the location.
pub struct StringScanner<'l> {
    input: &'l str,
    chars: Peekable<Chars<'l>>,
    location: SourceLocation,
}

impl<'l> StringScanner<'l> {
    pub fn from_input(input: &'l str) -> StringScanner<'l> {
        StringScanner {
            input,
            chars: input.chars().peekable(),
            location: SourceLocation::new(0, 0),
        }
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn next(&mut self) -> Option<char> {
        let consumed = self.chars.next()?;

        self.location = if consumed == '\n' {
            SourceLocation::new(self.location.line() + 1, 0)
        } else {
            SourceLocation::new(self.location.line(), self.location.column() + 1)
        };

        Some(consumed)
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn input(&self) -> &'l str {
        self.input
    }
}
