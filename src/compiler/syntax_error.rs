use serde::Serialize;
use std::fmt;

use super::source_location::SourceLocation;

#[derive(Debug, Serialize)]
pub struct SyntaxError {
    location: SourceLocation,

    message: Option<String>,
}

impl SyntaxError {
    pub fn from_location(loc: SourceLocation) -> SyntaxError {
        SyntaxError {
            location: loc,
            message: None,
        }
    }

    pub fn with_message(mut self, msg: String) -> SyntaxError {
        self.message = Some(msg);
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message {
            Some(ref msg) => write!(
                f,
                "Syntax error at line {}, column {}: {}",
                self.location.line(),
                self.location.column(),
                msg
            ),
            None => write!(
                f,
                "Syntax error at line {}, column {}",
                self.location.line(),
                self.location.column()
            ),
        }
    }
}

impl std::error::Error for SyntaxError {}
