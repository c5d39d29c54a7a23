//! Expression parsing implementation
//!
//! Binary operators are parsed by precedence climbing, one routine per level,
//! lowest to highest binding:
//!
//! ```text
//! ||  →  &&  →  == !=  →  < > <= >=  →  + -  →  * / %  →  unary - !  →  primary
//! ```
//!
//! Every binary level is left-associative. Unary operators are prefix and
//! right-recursive. Primary expressions are literals, identifiers, `true` and
//! `false`, parenthesized expressions and function calls.

use crate::parser::ast::*;
use crate::parser::error::ParseError;
use crate::parser::lexer::{Keyword, Operator, TokenKind};
use crate::parser::parse::Parser;

/// Binary precedence levels, loosest first
const BINARY_LEVELS: &[&[(Operator, BinOp)]] = &[
    &[(Operator::OrOr, BinOp::Or)],
    &[(Operator::AndAnd, BinOp::And)],
    &[(Operator::EqEq, BinOp::Eq), (Operator::NotEq, BinOp::Ne)],
    &[
        (Operator::Lt, BinOp::Lt),
        (Operator::Gt, BinOp::Gt),
        (Operator::Le, BinOp::Le),
        (Operator::Ge, BinOp::Ge),
    ],
    &[(Operator::Plus, BinOp::Add), (Operator::Minus, BinOp::Sub)],
    &[
        (Operator::Star, BinOp::Mul),
        (Operator::Slash, BinOp::Div),
        (Operator::Percent, BinOp::Mod),
    ],
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(0)
    }

    /// Parse one precedence level
    fn parse_binary(&mut self, level: usize) -> Result<Expr, ParseError> {
        let Some(operators) = BINARY_LEVELS.get(level) else {
            return self.parse_unary();
        };

        let left = self.parse_binary(level + 1)?;
        self.parse_binary_tail(level, operators, left)
    }

    /// Fold `op right` pairs onto `left`, left-associatively.
    ///
    /// Every operator deepens the tree by one node, so each one also counts
    /// as a nesting level; a long flat chain hits the depth limit instead of
    /// building a tree too deep to walk.
    fn parse_binary_tail(
        &mut self,
        level: usize,
        operators: &[(Operator, BinOp)],
        left: Expr,
    ) -> Result<Expr, ParseError> {
        let Some(op) = self.match_binary_operator(operators) else {
            return Ok(left);
        };

        let right = self.parse_binary(level + 1)?;
        let combined = Expr::binary(left, op, right);
        self.nested(|p| p.parse_binary_tail(level, operators, combined))
    }

    /// Consume the current token if it is one of `operators`
    fn match_binary_operator(&mut self, operators: &[(Operator, BinOp)]) -> Option<BinOp> {
        let TokenKind::Operator(current) = self.peek_kind() else {
            return None;
        };

        let op = operators
            .iter()
            .find(|(token_op, _)| *token_op == current)
            .map(|(_, op)| *op)?;
        self.advance();
        Some(op)
    }

    /// Parse unary (- !)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek_kind() {
            TokenKind::Operator(Operator::Minus) => UnOp::Neg,
            TokenKind::Operator(Operator::Bang) => UnOp::Not,
            _ => return self.parse_primary(),
        };
        self.advance();

        let operand = self.nested(|p| p.parse_unary())?;
        Ok(Expr::unary(op, operand))
    }

    /// Parse primary (literals, identifiers, calls, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => Ok(Expr::Number(self.advance().text)),
            TokenKind::Str => Ok(Expr::Str(self.advance().text)),
            TokenKind::Keyword(Keyword::True) | TokenKind::Keyword(Keyword::False) => {
                Ok(Expr::Identifier(self.advance().text))
            }
            TokenKind::Identifier => {
                if self.peek_ahead(1) == TokenKind::LParen {
                    Ok(Expr::Call(self.parse_function_call()?))
                } else {
                    Ok(Expr::Identifier(self.advance().text))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.nested(|p| p.parse_expression())?;
                self.expect_token(TokenKind::RParen, "after expression")?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Parse `name(arg, arg, ...)`
    pub(crate) fn parse_function_call(&mut self) -> Result<FunctionCall, ParseError> {
        let name = self.expect_identifier("as function name")?;
        self.expect_token(TokenKind::LParen, &format!("after function name '{name}'"))?;

        let args = self.nested(|p| {
            let mut args = Vec::new();
            if p.check(TokenKind::RParen) {
                return Ok(args);
            }

            loop {
                args.push(p.parse_expression()?);
                if !p.match_token(TokenKind::Comma) {
                    break;
                }
            }
            Ok(args)
        })?;

        self.expect_token(TokenKind::RParen, "after function arguments")?;
        Ok(FunctionCall { name, args })
    }
}
