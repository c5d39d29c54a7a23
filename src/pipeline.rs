//! Compilation pipeline: source → tokens → AST → C++
//!
//! Every call builds fresh lexer, parser and generator state; nothing is
//! shared between compilations.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codegen::{CodeGenerator, OutputLine, TypeMap};
use crate::error::CompileError;
use crate::parser::ast::Program;
use crate::parser::error::{ParseError, SyntaxError};
use crate::parser::lexer::{Lexer, Token};
use crate::parser::parse::{Parser, DEFAULT_MAX_NESTING_DEPTH};

/// Knobs for a single compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Bound on block, parenthesis, unary and argument nesting
    pub max_nesting_depth: usize,
    /// `(volt_type, cpp_type)` pairs layered over the built-in type table
    pub type_overrides: Vec<(String, String)>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            type_overrides: Vec::new(),
        }
    }
}

/// Every intermediate product of one compilation
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub lines: Vec<OutputLine>,
}

impl Compilation {
    /// Generated C++ text
    pub fn output(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split `source` into tokens, ending with `Eof`
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let tokens = Lexer::new(source).tokenize()?;
    debug!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Build the AST with the default nesting limit
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    parse_with_depth(tokens, DEFAULT_MAX_NESTING_DEPTH)
}

fn parse_with_depth(tokens: Vec<Token>, max_depth: usize) -> Result<Program, ParseError> {
    let program = Parser::new(tokens)
        .with_max_depth(max_depth)
        .parse_program()?;
    debug!(statements = program.statements.len(), "parsed program");
    Ok(program)
}

/// Emit C++ with the built-in type table
pub fn generate(program: &Program) -> String {
    CodeGenerator::new().generate(program)
}

/// Compile VoltScript source to C++ with default options
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with(source, &CompileOptions::default())
}

pub fn compile_with(source: &str, options: &CompileOptions) -> Result<String, CompileError> {
    Ok(compile_detailed(source, options)?.output())
}

/// Compile and keep the token stream, AST and annotated output lines
pub fn compile_detailed(
    source: &str,
    options: &CompileOptions,
) -> Result<Compilation, CompileError> {
    let tokens = tokenize(source)?;
    let program = parse_with_depth(tokens.clone(), options.max_nesting_depth)?;

    let type_map = TypeMap::with_overrides(&options.type_overrides);
    let lines = CodeGenerator::with_type_map(type_map).emit(&program);
    debug!(lines = lines.len(), "generated C++");

    Ok(Compilation {
        tokens,
        program,
        lines,
    })
}

/// `prog.volt` → `prog.cpp`; any other name gets `.cpp` appended
pub fn default_output_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "volt") {
        input.with_extension("cpp")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".cpp");
        PathBuf::from(name)
    }
}

/// Reject sources with nothing but whitespace
pub fn ensure_not_empty(source: &str) -> Result<(), CompileError> {
    if source.trim().is_empty() {
        Err(CompileError::EmptySource)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_detailed_keeps_stages() {
        let compilation = compile_detailed("int x = 1;", &CompileOptions::default()).unwrap();
        assert_eq!(compilation.tokens.len(), 6);
        assert_eq!(compilation.program.statements.len(), 1);
        assert_eq!(compilation.output(), compile("int x = 1;").unwrap());
    }

    #[test]
    fn test_options_reach_every_stage() {
        let options = CompileOptions {
            max_nesting_depth: 2,
            type_overrides: vec![("int".to_string(), "long".to_string())],
        };
        assert!(compile_with("int x = (1);", &options).unwrap().contains("long x = 1;"));
        assert!(compile_with("int x = (((1)));", &options).is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("demo/hello.volt")),
            PathBuf::from("demo/hello.cpp")
        );
        assert_eq!(
            default_output_path(Path::new("hello")),
            PathBuf::from("hello.cpp")
        );
        assert_eq!(
            default_output_path(Path::new("hello.txt")),
            PathBuf::from("hello.txt.cpp")
        );
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(matches!(ensure_not_empty(" \n\t"), Err(CompileError::EmptySource)));
        assert!(ensure_not_empty("print(1);").is_ok());
    }
}
