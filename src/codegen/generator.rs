//! Tree-walking C++ emitter
//!
//! Each statement becomes one or more lines inside a single `main()`; every
//! line remembers the source location of the statement that produced it so
//! front ends can map output back to input.

use crate::codegen::constants::*;
use crate::codegen::types::TypeMap;
use crate::parser::ast::*;

/// A line of generated C++ and the statement it came from.
///
/// `origin` is `None` for the fixed prologue and epilogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub origin: Option<SourceLocation>,
}

pub struct CodeGenerator {
    indent_level: usize,
    lines: Vec<OutputLine>,
    origin: Option<SourceLocation>,
    type_map: TypeMap,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::with_type_map(TypeMap::new())
    }

    pub fn with_type_map(type_map: TypeMap) -> Self {
        Self {
            indent_level: 0,
            lines: Vec::new(),
            origin: None,
            type_map,
        }
    }

    /// Generate the C++ translation unit as a single string
    pub fn generate(&mut self, program: &Program) -> String {
        self.emit(program)
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generate the C++ translation unit as annotated lines
    pub fn emit(&mut self, program: &Program) -> Vec<OutputLine> {
        self.indent_level = 0;
        self.origin = None;
        self.lines.clear();

        for line in PROLOGUE {
            self.push_line(line.to_string());
        }

        self.indent_level += 1;
        for stmt in &program.statements {
            self.emit_statement(stmt);
        }
        self.push_line(MAIN_RETURN.to_string());
        self.indent_level -= 1;
        self.push_line(CLOSING_BRACE.to_string());

        std::mem::take(&mut self.lines)
    }

    fn push_line(&mut self, text: String) {
        let text = if text.is_empty() {
            text
        } else {
            format!("{}{}", INDENT.repeat(self.indent_level), text)
        };
        self.lines.push(OutputLine {
            text,
            origin: self.origin,
        });
    }

    fn emit_statement(&mut self, stmt: &Stmt) {
        let enclosing = self.origin.replace(stmt.location());

        match stmt {
            Stmt::VarDecl(decl) => {
                let line = format!("{};", self.var_decl_clause(decl));
                self.push_line(line);
            }
            Stmt::Assign(assign) => {
                let line = format!("{};", self.assign_clause(assign));
                self.push_line(line);
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                let header = format!("if ({}) {{", self.expression(condition));
                self.emit_block(header, then_block);
                if let Some(else_block) = else_block {
                    self.emit_block("else {".to_string(), else_block);
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                let header = format!("while ({}) {{", self.expression(condition));
                self.emit_block(header, body);
            }
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                let init = match init {
                    Some(ForInit::Decl(decl)) => self.var_decl_clause(decl),
                    Some(ForInit::Assign(assign)) => self.assign_clause(assign),
                    None => String::new(),
                };
                let condition = condition
                    .as_ref()
                    .map(|c| self.expression(c))
                    .unwrap_or_default();
                let update = update
                    .as_ref()
                    .map(|u| self.assign_clause(u))
                    .unwrap_or_default();

                let header = format!("for ({init}; {condition}; {update}) {{");
                self.emit_block(header, body);
            }
            Stmt::Call { call, .. } => {
                let line = format!("{};", self.call(call));
                self.push_line(line);
            }
            Stmt::Return { value, .. } => {
                let line = match value {
                    Some(value) => format!("return {};", self.expression(value)),
                    None => "return;".to_string(),
                };
                self.push_line(line);
            }
            Stmt::Print { expr, .. } => {
                let line = format!("std::cout << {} << std::endl;", self.expression(expr));
                self.push_line(line);
            }
        }

        self.origin = enclosing;
    }

    /// `header` line, indented body, closing brace
    fn emit_block(&mut self, header: String, body: &[Stmt]) {
        self.push_line(header);
        self.indent_level += 1;
        for stmt in body {
            self.emit_statement(stmt);
        }
        self.indent_level -= 1;
        self.push_line(CLOSING_BRACE.to_string());
    }

    fn var_decl_clause(&self, decl: &VarDecl) -> String {
        let cpp_type = self.type_map.map(&decl.var_type);
        match &decl.init {
            Some(init) => format!("{} {} = {}", cpp_type, decl.name, self.expression(init)),
            None => format!("{} {}", cpp_type, decl.name),
        }
    }

    fn assign_clause(&self, assign: &Assign) -> String {
        format!("{} = {}", assign.name, self.expression(&assign.value))
    }

    /// Render an expression, parenthesizing every operator application
    fn expression(&self, expr: &Expr) -> String {
        match expr {
            Expr::Number(text) => text.clone(),
            Expr::Str(text) => quote_string(text),
            Expr::Identifier(name) => match name.as_str() {
                "true" => TRUE_LITERAL.to_string(),
                "false" => FALSE_LITERAL.to_string(),
                _ => name.clone(),
            },
            Expr::Binary { op, left, right } => format!(
                "({} {} {})",
                self.expression(left),
                op.symbol(),
                self.expression(right)
            ),
            Expr::Unary { op, operand } => {
                format!("({}{})", op.symbol(), self.expression(operand))
            }
            Expr::Call(call) => self.call(call),
        }
    }

    fn call(&self, call: &FunctionCall) -> String {
        let args = call
            .args
            .iter()
            .map(|arg| self.expression(arg))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", call.name, args)
    }
}

/// Wrap string contents in C++ quotes.
///
/// Backslash escapes in the text (`\n`) pass through. Every `"` is escaped,
/// and backslashes directly before a `"` or at the very end are doubled so
/// they stay literal and the quote still closes.
fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    let mut pending = 0;
    for c in text.chars() {
        match c {
            '\\' => pending += 1,
            '"' => {
                quoted.push_str(&"\\".repeat(pending * 2 + 1));
                quoted.push('"');
                pending = 0;
            }
            _ => {
                quoted.push_str(&"\\".repeat(pending));
                quoted.push(c);
                pending = 0;
            }
        }
    }
    quoted.push_str(&"\\".repeat(pending * 2));
    quoted.push('"');
    quoted
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn program(source: &str) -> Program {
        Parser::from_source(source)
            .and_then(|mut p| p.parse_program())
            .unwrap()
    }

    fn body(source: &str) -> Vec<String> {
        let lines = CodeGenerator::new().emit(&program(source));
        // strip prologue (4 lines) and `return 0;` / `}`
        lines[4..lines.len() - 2]
            .iter()
            .map(|l| l.text.clone())
            .collect()
    }

    #[test]
    fn test_empty_program_frame() {
        let output = CodeGenerator::new().generate(&Program::new());
        assert_eq!(
            output,
            "#include <iostream>\n#include <string>\n\nint main() {\n    return 0;\n}"
        );
    }

    #[test]
    fn test_declaration_and_print() {
        assert_eq!(
            body("int x = 5; print(x + 2);"),
            vec!["    int x = 5;", "    std::cout << (x + 2) << std::endl;"]
        );
    }

    #[test]
    fn test_for_header() {
        assert_eq!(
            body("for (int i = 0; i < 3; i = i + 1) { print(i); }"),
            vec![
                "    for (int i = 0; (i < 3); i = (i + 1)) {",
                "        std::cout << i << std::endl;",
                "    }",
            ]
        );
    }

    #[test]
    fn test_for_header_empty_clauses() {
        assert_eq!(
            body("for (;;) { }"),
            vec!["    for (; ; ) {", "    }"]
        );
    }

    #[test]
    fn test_if_else_layout() {
        assert_eq!(
            body("if (x > 1) { y = 1; } else { y = 2; }"),
            vec![
                "    if ((x > 1)) {",
                "        y = 1;",
                "    }",
                "    else {",
                "        y = 2;",
                "    }",
            ]
        );
    }

    #[test]
    fn test_nested_unary_and_binary() {
        assert_eq!(
            body("bool b = !(a && -c < 2) || true;"),
            vec!["    bool b = ((!(a && ((-c) < 2))) || true);"]
        );
    }

    #[test]
    fn test_types_and_strings() {
        assert_eq!(
            body("float f = 1.5; string s = \"say \\\"hi\\\"\"; vec3 v;"),
            vec![
                "    double f = 1.5;",
                "    std::string s = \"say \\\"hi\\\"\";",
                "    vec3 v;",
            ]
        );
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string("plain"), "\"plain\"");
        assert_eq!(quote_string("a\\nb"), "\"a\\nb\"");
        // `a\"b` must keep the quote escaped: `"a\\\"b"`
        assert_eq!(quote_string("a\\\"b"), "\"a\\\\\\\"b\"");
        // trailing backslash must not swallow the closing quote
        assert_eq!(quote_string("dir\\"), "\"dir\\\\\"");
    }

    #[test]
    fn test_backslash_before_quote_in_source() {
        // source literal "a\\"b" lexes to the text a\"b
        assert_eq!(
            body("string s = \"a\\\\\"b\";"),
            vec!["    std::string s = \"a\\\\\\\"b\";"]
        );
    }

    #[test]
    fn test_calls_and_returns() {
        assert_eq!(
            body("log(1, f(2)); return; return x * 2;"),
            vec!["    log(1, f(2));", "    return;", "    return (x * 2);"]
        );
    }

    #[test]
    fn test_type_overrides() {
        let types = TypeMap::with_overrides(&[("float".to_string(), "float".to_string())]);
        let output = CodeGenerator::with_type_map(types).generate(&program("float f;"));
        assert!(output.contains("    float f;"));
    }

    #[test]
    fn test_line_origins() {
        let source = "int a = 1;\nwhile (a < 3) {\n  a = a + 1;\n}";
        let lines = CodeGenerator::new().emit(&program(source));
        let origins: Vec<_> = lines.iter().map(|l| l.origin.map(|o| o.line)).collect();
        assert_eq!(
            origins,
            vec![
                None,
                None,
                None,
                None,
                Some(1),
                Some(2),
                Some(3),
                Some(2),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_generator_is_reusable() {
        let mut generator = CodeGenerator::new();
        let first = generator.generate(&program("print(1);"));
        let second = generator.generate(&program("print(1);"));
        assert_eq!(first, second);
    }
}
