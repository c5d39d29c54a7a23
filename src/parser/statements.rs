//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl ";" | assign ";" | if_stmt | while_stmt | for_stmt
//!             | "return" expr? ";" | "print" "(" expr ")" ";" | call ";"
//! var_decl  ::= type identifier ( "=" expr )?
//! assign    ::= identifier "=" expr
//! if_stmt   ::= "if" "(" expr ")" block ( "else" ( block | if_stmt ) )?
//! for_stmt  ::= "for" "(" ( var_decl | assign )? ";" expr? ";" assign? ")" block
//! block     ::= "{" statement* "}"
//! ```
//!
//! `var_decl` and `assign` are parsed as semicolon-free clauses so the same
//! routines serve standalone statements and the `for` header.

use crate::parser::ast::*;
use crate::parser::error::ParseError;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::Parser;

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.is_declaration_start() {
            let decl = self.parse_var_decl_clause()?;
            self.expect_token(TokenKind::Semicolon, "after variable declaration")?;
            return Ok(Stmt::VarDecl(decl));
        }

        match self.peek_kind() {
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return_statement(),
            TokenKind::Keyword(Keyword::Print) => self.parse_print_statement(),
            TokenKind::Identifier => match self.peek_ahead(1) {
                TokenKind::Assign => {
                    let assign = self.parse_assign_clause()?;
                    self.expect_token(TokenKind::Semicolon, "after assignment")?;
                    Ok(Stmt::Assign(assign))
                }
                TokenKind::LParen => {
                    let location = self.current_location();
                    let call = self.parse_function_call()?;
                    self.expect_token(TokenKind::Semicolon, "after function call")?;
                    Ok(Stmt::Call { call, location })
                }
                _ => {
                    let name = self.advance().text;
                    Err(self.expected(format!("'=' or '(' after identifier '{name}'")))
                }
            },
            _ => Err(self.unexpected()),
        }
    }

    /// A declaration opens with a type keyword, or with a custom type name:
    /// an identifier directly followed by another identifier.
    pub(crate) fn is_declaration_start(&self) -> bool {
        match self.peek_kind() {
            TokenKind::Keyword(kw) => kw.is_type(),
            TokenKind::Identifier => self.peek_ahead(1) == TokenKind::Identifier,
            _ => false,
        }
    }

    /// `type name [= expr]` without the trailing semicolon
    pub(crate) fn parse_var_decl_clause(&mut self) -> Result<VarDecl, ParseError> {
        let location = self.current_location();
        if !self.is_declaration_start() {
            return Err(self.expected("type name"));
        }
        let var_type = self.advance().text;
        let name = self.expect_identifier(&format!("after type '{var_type}'"))?;

        let init = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(VarDecl {
            var_type,
            name,
            init,
            location,
        })
    }

    /// `name = expr` without the trailing semicolon
    pub(crate) fn parse_assign_clause(&mut self) -> Result<Assign, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier("at start of assignment")?;
        self.expect_token(TokenKind::Assign, &format!("after '{name}'"))?;
        let value = self.parse_expression()?;

        Ok(Assign {
            name,
            value,
            location,
        })
    }

    /// Parse if statement; `else if` nests the chained `if` inside the else block
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect_token(TokenKind::Keyword(Keyword::If), "")?;

        self.expect_token(TokenKind::LParen, "after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "after if condition")?;

        let then_block = self.parse_block()?;

        let else_block = if self.match_token(TokenKind::Keyword(Keyword::Else)) {
            if self.check_keyword(Keyword::If) {
                let chained = self.nested(|p| p.parse_if_statement())?;
                Some(vec![chained])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect_token(TokenKind::Keyword(Keyword::While), "")?;

        self.expect_token(TokenKind::LParen, "after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "after while condition")?;

        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse for statement. Each header clause is parsed exactly once.
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect_token(TokenKind::Keyword(Keyword::For), "")?;
        self.expect_token(TokenKind::LParen, "after 'for'")?;

        // Init (optional)
        let init = if self.check(TokenKind::Semicolon) {
            None
        } else if self.is_declaration_start() {
            Some(ForInit::Decl(self.parse_var_decl_clause()?))
        } else {
            Some(ForInit::Assign(self.parse_assign_clause()?))
        };
        self.expect_token(TokenKind::Semicolon, "after for-loop initializer")?;

        // Condition (optional)
        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_token(TokenKind::Semicolon, "after for-loop condition")?;

        // Update (optional, assignment only)
        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_assign_clause()?)
        };
        self.expect_token(TokenKind::RParen, "after for-loop clauses")?;

        let body = self.parse_block()?;

        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            location,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect_token(TokenKind::Keyword(Keyword::Return), "")?;

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_token(TokenKind::Semicolon, "after return")?;

        Ok(Stmt::Return { value, location })
    }

    /// Parse print statement: `print(expr);`
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect_token(TokenKind::Keyword(Keyword::Print), "")?;

        self.expect_token(TokenKind::LParen, "after 'print'")?;
        let expr = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "after print argument")?;
        self.expect_token(TokenKind::Semicolon, "after print statement")?;

        Ok(Stmt::Print { expr, location })
    }

    /// Parse a braced block of statements
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.nested(|p| {
            p.expect_token(TokenKind::LBrace, "to open block")?;

            let mut statements = Vec::new();
            while !p.check(TokenKind::RBrace) && !p.is_at_end() {
                statements.push(p.parse_statement()?);
            }

            p.expect_token(TokenKind::RBrace, "to close block")?;
            Ok(statements)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::error::{ParseError, SyntaxError};
    use crate::parser::parse::Parser;

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    fn num(text: &str) -> Expr {
        Expr::Number(text.to_string())
    }

    #[test]
    fn test_for_loop_clauses_parsed_once() {
        let program = parse("for (int i = 0; i < 3; i = i + 1) { print(i); }").unwrap();
        assert_eq!(program.statements.len(), 1);

        match &program.statements[0] {
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                match init {
                    Some(ForInit::Decl(decl)) => {
                        assert_eq!(decl.var_type, "int");
                        assert_eq!(decl.name, "i");
                        assert_eq!(decl.init, Some(num("0")));
                    }
                    other => panic!("Expected declaration init, got {other:?}"),
                }
                assert_eq!(
                    condition,
                    &Some(Expr::binary(ident("i"), BinOp::Lt, num("3")))
                );
                let update = update.as_ref().unwrap();
                assert_eq!(update.name, "i");
                assert_eq!(update.value, Expr::binary(ident("i"), BinOp::Add, num("1")));
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0], Stmt::Print { .. }));
            }
            other => panic!("Expected for loop, got {other:?}"),
        }
    }

    #[test]
    fn test_for_loop_with_empty_clauses() {
        let program = parse("for (;;) { }").unwrap();
        match &program.statements[0] {
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                assert!(init.is_none());
                assert!(condition.is_none());
                assert!(update.is_none());
                assert!(body.is_empty());
            }
            other => panic!("Expected for loop, got {other:?}"),
        }
    }

    #[test]
    fn test_for_loop_assignment_init() {
        let program = parse("int i; for (i = 10; i > 0; ) { i = i - 1; }").unwrap();
        match &program.statements[1] {
            Stmt::For { init, update, .. } => {
                assert!(matches!(init, Some(ForInit::Assign(a)) if a.name == "i"));
                assert!(update.is_none());
            }
            other => panic!("Expected for loop, got {other:?}"),
        }
    }

    #[test]
    fn test_for_loop_update_must_be_assignment() {
        let err = parse("for (int i = 0; i < 3; print(i)) { }").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(SyntaxError::Expected { .. })));
    }

    #[test]
    fn test_if_else() {
        let program = parse("if (x > 0) { print(1); } else { print(0); print(2); }").unwrap();
        match &program.statements[0] {
            Stmt::If {
                then_block,
                else_block,
                ..
            } => {
                assert_eq!(then_block.len(), 1);
                assert_eq!(else_block.as_ref().map(Vec::len), Some(2));
            }
            other => panic!("Expected if statement, got {other:?}"),
        }
    }

    #[test]
    fn test_if_without_else() {
        let program = parse("if (ok) { }").unwrap();
        assert!(matches!(
            &program.statements[0],
            Stmt::If { else_block: None, .. }
        ));
    }

    #[test]
    fn test_else_if_chain() {
        let program =
            parse("if (a) { print(1); } else if (b) { print(2); } else { print(3); }").unwrap();
        match &program.statements[0] {
            Stmt::If { else_block, .. } => {
                let else_block = else_block.as_ref().unwrap();
                assert_eq!(else_block.len(), 1);
                assert!(matches!(
                    &else_block[0],
                    Stmt::If {
                        else_block: Some(_),
                        ..
                    }
                ));
            }
            other => panic!("Expected if statement, got {other:?}"),
        }
    }

    #[test]
    fn test_while_loop() {
        let program = parse("while (i < 5) { print(i); i = i + 1; }").unwrap();
        match &program.statements[0] {
            Stmt::While { condition, body, .. } => {
                assert_eq!(condition, &Expr::binary(ident("i"), BinOp::Lt, num("5")));
                assert_eq!(body.len(), 2);
            }
            other => panic!("Expected while loop, got {other:?}"),
        }
    }

    #[test]
    fn test_return_forms() {
        let program = parse("return; return x * 2;").unwrap();
        assert!(matches!(program.statements[0], Stmt::Return { value: None, .. }));
        assert!(matches!(
            program.statements[1],
            Stmt::Return { value: Some(_), .. }
        ));
    }

    #[test]
    fn test_call_statement() {
        let program = parse("greet(\"bob\", 3);").unwrap();
        match &program.statements[0] {
            Stmt::Call { call, .. } => {
                assert_eq!(call.name, "greet");
                assert_eq!(call.args, vec![Expr::Str("bob".to_string()), num("3")]);
            }
            other => panic!("Expected call statement, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_type_declaration() {
        let program = parse("vec3 position;").unwrap();
        match &program.statements[0] {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.var_type, "vec3");
                assert_eq!(decl.name, "position");
                assert!(decl.init.is_none());
            }
            other => panic!("Expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_declaration_name_must_be_identifier() {
        let err = parse("int 5x;").unwrap_err();
        match err {
            ParseError::Syntax(SyntaxError::Expected {
                expected,
                found,
                location,
            }) => {
                assert_eq!(expected, "identifier after type 'int'");
                assert_eq!(found, "number '5'");
                assert_eq!(location.line, 1);
            }
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int x = 1\nint y = 2;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected ';' after variable declaration, found keyword 'int' at line 2"
        );
    }

    #[test]
    fn test_bare_identifier_statement() {
        let err = parse("x;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected '=' or '(' after identifier 'x', found ';' at line 1"
        );
    }

    #[test]
    fn test_unexpected_statement_start() {
        let err = parse("else { }").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected keyword 'else' at line 1");
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("while (true) { print(1);").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected '}' to close block, found end of input at line 1"
        );
    }

    #[test]
    fn test_block_nesting_limit() {
        let source = format!("{}{}", "if (x) { ".repeat(6), "}".repeat(6));
        let mut parser = Parser::from_source(&source).unwrap().with_max_depth(4);
        assert!(matches!(
            parser.parse_program(),
            Err(ParseError::NestingTooDeep { limit: 4, .. })
        ));
    }
}
