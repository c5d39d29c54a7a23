//! VoltScript front end
//!
//! This module transforms VoltScript source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with statement and expression
//!   routines split across `impl Parser` blocks
//! - [`ast`]: AST node definitions
//! - [`error`]: Lexical and syntactic error types
//!
//! # Supported Language
//!
//! - Types: `int`, `float`, `string`, `bool`, `void`, plus any identifier used
//!   as a type name (`vec3 v;`)
//! - Statements: declarations, assignments, `if`/`else`/`else if`, `while`,
//!   `for`, `return`, `print(...)`, bare function calls
//! - Expressions: arithmetic, comparison, logical `&&`/`||`/`!`, unary minus,
//!   function calls, parentheses
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod error;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use ast::Program;
pub use error::{ParseError, SyntaxError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parse::{Parser, DEFAULT_MAX_NESTING_DEPTH};
