//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! token cursor helpers, the nesting-depth guard, and the program entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (declarations, if, while, for, ...)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! Parser methods are split across these files using `impl Parser` blocks.

use crate::parser::ast::*;
use crate::parser::error::{ParseError, SyntaxError};
use crate::parser::lexer::{Keyword, Lexer, Token, TokenKind};

/// Default bound on block, parenthesis and unary nesting
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Recursive descent parser for VoltScript
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Create a parser over an already tokenized program.
    ///
    /// A missing trailing `Eof` token is supplied, so any token vector is accepted.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Tokenize `source` and create a parser over the result
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(tokens))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.statements.push(self.parse_statement()?);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    /// Run `f` one nesting level deeper, failing once the limit is exceeded.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                location: self.current_location(),
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn peek(&self) -> &Token {
        // `new` guarantees a trailing Eof and `advance` never moves past it
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the token `n` positions ahead, clamped to the trailing Eof
    pub(crate) fn peek_ahead(&self, n: usize) -> TokenKind {
        let index = (self.position + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(TokenKind::Keyword(keyword))
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume and return the current token
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Consume a token of `kind` or fail naming what was expected and found
    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        context: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else if context.is_empty() {
            Err(self.expected(kind.describe()))
        } else {
            Err(self.expected(format!("{} {}", kind.describe(), context)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        Ok(self.expect_token(TokenKind::Identifier, context)?.text)
    }

    /// Build an "expected X, found <current token>" error
    pub(crate) fn expected(&self, expected: impl Into<String>) -> ParseError {
        SyntaxError::Expected {
            expected: expected.into(),
            found: self.peek().to_string(),
            location: self.current_location(),
        }
        .into()
    }

    /// Build an "unexpected <current token>" error
    pub(crate) fn unexpected(&self) -> ParseError {
        SyntaxError::Unexpected {
            found: self.peek().to_string(),
            location: self.current_location(),
        }
        .into()
    }
}
