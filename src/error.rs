//! Crate-level error type
//!
//! [`CompileError`] covers everything a front end can hit: front-end errors
//! from [`crate::parser`] plus file I/O and empty input. The generator itself
//! cannot fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ast::SourceLocation;
use crate::parser::error::{ParseError, SyntaxError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("File '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No code provided")]
    EmptySource,

    #[error("Terminal error: {0}")]
    Terminal(#[source] io::Error),
}

impl CompileError {
    /// Malformed VoltScript, as opposed to a resource limit or I/O failure
    pub fn is_syntax(&self) -> bool {
        matches!(self, CompileError::Parse(ParseError::Syntax(_)))
    }

    /// Prefix front ends print before the message
    pub fn label(&self) -> &'static str {
        if self.is_syntax() {
            "Syntax Error"
        } else {
            "Error"
        }
    }

    /// Source position of the failure, when it comes from the source text
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CompileError::Parse(err) => Some(err.location()),
            _ => None,
        }
    }

    /// Read `path`, mapping a missing file to [`CompileError::NotFound`]
    pub fn read_source(path: &std::path::Path) -> Result<String, CompileError> {
        std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                CompileError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CompileError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }
}

impl From<SyntaxError> for CompileError {
    fn from(err: SyntaxError) -> Self {
        CompileError::Parse(err.into())
    }
}
