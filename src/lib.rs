//! # Introduction
//!
//! voltc translates VoltScript, a small C-like teaching language, into a
//! single C++ translation unit whose `main()` holds the whole program. A
//! terminal viewer built with [ratatui](https://docs.rs/ratatui) shows the
//! source, the generated C++ and the token stream side by side.
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → CodeGenerator → C++
//! ```
//!
//! 1. [`parser::lexer`] splits the source into tokens.
//! 2. [`parser::parse`] builds the AST by recursive descent, with precedence
//!    climbing for binary operators and a bounded nesting depth.
//! 3. [`codegen`] walks the AST and emits fully parenthesized C++, tagging
//!    each line with the statement that produced it.
//! 4. [`ui`] is the ratatui viewer; not part of the stable library API.
//!
//! ```
//! let cpp = voltc::compile("int x = 5; print(x + 2);").unwrap();
//! assert!(cpp.contains("std::cout << (x + 2) << std::endl;"));
//! ```

pub mod codegen;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod ui;

pub use error::CompileError;
pub use pipeline::{
    compile, compile_detailed, compile_with, default_output_path, ensure_not_empty, generate,
    parse, tokenize, Compilation, CompileOptions,
};
