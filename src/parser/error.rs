//! Front-end error types
//!
//! [`SyntaxError`] is raised by both the lexer and the parser for malformed
//! input. [`ParseError`] wraps it and adds the nesting-depth guard, which is
//! a resource limit rather than a grammar violation.

use super::ast::SourceLocation;
use thiserror::Error;

/// Malformed source text; the first one aborts compilation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Unexpected character '{ch}' at {location}")]
    UnexpectedCharacter { ch: char, location: SourceLocation },

    #[error("Unterminated string literal starting at {location}")]
    UnterminatedString { location: SourceLocation },

    /// A specific token was required but something else was found
    #[error("Expected {expected}, found {found} at line {}", .location.line)]
    Expected {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    /// No grammar rule starts with the found token
    #[error("Unexpected {found} at line {}", .location.line)]
    Unexpected {
        found: String,
        location: SourceLocation,
    },
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SyntaxError::UnexpectedCharacter { location, .. }
            | SyntaxError::UnterminatedString { location }
            | SyntaxError::Expected { location, .. }
            | SyntaxError::Unexpected { location, .. } => *location,
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Nesting depth exceeds the limit of {limit} at {location}")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Syntax(err) => err.location(),
            ParseError::NestingTooDeep { location, .. } => *location,
        }
    }
}
