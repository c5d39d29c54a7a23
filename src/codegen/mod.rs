//! C++ code generation
//!
//! - [`generator`]: Tree-walking emitter producing C++ lines from a [`Program`]
//! - [`types`]: VoltScript → C++ type name table
//!
//! The generator is infallible: every AST node has exactly one rendering.
//!
//! [`Program`]: crate::parser::ast::Program

mod constants;
pub mod generator;
pub mod types;

pub use generator::{CodeGenerator, OutputLine};
pub use types::TypeMap;
