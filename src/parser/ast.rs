// AST (Abstract Syntax Tree) definitions for VoltScript programs

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    /// The operator as written in both VoltScript and C++.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// A call `name(args)`, usable both as an expression and as a statement
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Raw digits-and-dots text, e.g. `3.14`
    Number(String),
    /// Unescaped string contents (without the quotes)
    Str(String),
    /// Variable name; also carries the literals `true` and `false`
    Identifier(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Call(FunctionCall),
}

impl Expr {
    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

/// Variable declaration: `type name [= init]`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// Declared type as written in the source; never validated
    pub var_type: String,
    pub name: String,
    pub init: Option<Expr>,
    pub location: SourceLocation,
}

/// Assignment: `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: String,
    pub value: Expr,
    pub location: SourceLocation,
}

/// Init clause of a `for` header
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Decl(VarDecl),
    Assign(Assign),
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign(Assign),
    If {
        condition: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    For {
        init: Option<ForInit>,
        condition: Option<Expr>,
        update: Option<Assign>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Call {
        call: FunctionCall,
        location: SourceLocation,
    },
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
    Print {
        expr: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this statement (its first token)
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::VarDecl(decl) => decl.location,
            Stmt::Assign(assign) => assign.location,
            Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::For { location, .. }
            | Stmt::Call { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Print { location, .. } => *location,
        }
    }

    /// Nested statement blocks, in source order
    pub fn blocks(&self) -> Vec<&[Stmt]> {
        match self {
            Stmt::If {
                then_block,
                else_block,
                ..
            } => {
                let mut blocks = vec![then_block.as_slice()];
                if let Some(else_block) = else_block {
                    blocks.push(else_block.as_slice());
                }
                blocks
            }
            Stmt::While { body, .. } | Stmt::For { body, .. } => vec![body.as_slice()],
            Stmt::VarDecl(_)
            | Stmt::Assign(_)
            | Stmt::Call { .. }
            | Stmt::Return { .. }
            | Stmt::Print { .. } => Vec::new(),
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// All statements in pre-order, descending into nested blocks.
    pub fn walk(&self) -> Vec<&Stmt> {
        fn visit<'a>(statements: &'a [Stmt], out: &mut Vec<&'a Stmt>) {
            for stmt in statements {
                out.push(stmt);
                for block in stmt.blocks() {
                    visit(block, out);
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.statements, &mut out);
        out
    }
}
