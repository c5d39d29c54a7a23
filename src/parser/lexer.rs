//! Lexer (tokenizer) for VoltScript source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Scanning is fail-fast: the first character that starts no token aborts with a
//! [`SyntaxError`] carrying its line and column.

use super::ast::SourceLocation;
use super::error::SyntaxError;
use std::fmt;

/// Reserved words. Anything else made of identifier characters is an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Types
    Int,
    Float,
    String,
    Bool,
    Void,
    // Control flow
    If,
    Else,
    While,
    For,
    Return,
    // Literals
    True,
    False,
    // Builtins
    Print,
}

impl Keyword {
    pub fn lookup(word: &str) -> Option<Self> {
        let keyword = match word {
            "int" => Keyword::Int,
            "float" => Keyword::Float,
            "string" => Keyword::String,
            "bool" => Keyword::Bool,
            "void" => Keyword::Void,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "for" => Keyword::For,
            "return" => Keyword::Return,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "print" => Keyword::Print,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::String => "string",
            Keyword::Bool => "bool",
            Keyword::Void => "void",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Return => "return",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Print => "print",
        }
    }

    /// Whether this keyword names a built-in type and so can open a declaration
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Keyword::Int | Keyword::Float | Keyword::String | Keyword::Bool | Keyword::Void
        )
    }
}

/// The recognized operator set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Gt,    // >
    Le,    // <=
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !
}

impl Operator {
    pub fn lookup(text: &str) -> Option<Self> {
        let op = match text {
            "+" => Operator::Plus,
            "-" => Operator::Minus,
            "*" => Operator::Star,
            "/" => Operator::Slash,
            "%" => Operator::Percent,
            "==" => Operator::EqEq,
            "!=" => Operator::NotEq,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            "&&" => Operator::AndAnd,
            "||" => Operator::OrOr,
            "!" => Operator::Bang,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::EqEq => "==",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::AndAnd => "&&",
            Operator::OrOr => "||",
            Operator::Bang => "!",
        }
    }
}

/// Token categories. Keywords and operators carry which one they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Number,
    Str,
    Operator(Operator),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Assign,
    Eof,
}

impl TokenKind {
    /// Short name used in "expected ..." diagnostics
    pub fn describe(self) -> String {
        match self {
            TokenKind::Keyword(kw) => format!("'{}'", kw.as_str()),
            TokenKind::Identifier => "identifier".to_string(),
            TokenKind::Number => "number".to_string(),
            TokenKind::Str => "string literal".to_string(),
            TokenKind::Operator(op) => format!("'{}'", op.as_str()),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Assign => "'='".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }

    /// Column label used by the token pane
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Operator(_) => "operator",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Comma => "comma",
            TokenKind::Assign => "assign",
            TokenKind::Eof => "eof",
        }
    }
}

/// A lexical unit with its literal text and where it starts.
///
/// For string literals `text` holds the unescaped contents without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword(kw) => write!(f, "keyword '{}'", kw.as_str()),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number '{}'", self.text),
            TokenKind::Str => write!(f, "string literal \"{}\"", self.text),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op.as_str()),
            kind => f.write_str(&kind.describe()),
        }
    }
}

/// Lexer for VoltScript source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with an `Eof` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Scan one token starting at the current (non-blank) character
    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let loc = self.current_location();
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", loc));
        };

        let punct = match ch {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            ';' => Some(TokenKind::Semicolon),
            ',' => Some(TokenKind::Comma),
            '=' if self.peek_ahead(1) != Some('=') => Some(TokenKind::Assign),
            _ => None,
        };
        if let Some(kind) = punct {
            self.advance();
            return Ok(Token::new(kind, ch, loc));
        }

        match ch {
            '0'..='9' => Ok(self.number_literal()),
            '"' => self.string_literal(),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.identifier_or_keyword()),
            '+' | '-' | '*' | '/' | '%' | '<' | '>' | '!' | '=' | '&' | '|' => self.operator(),
            _ => Err(SyntaxError::UnexpectedCharacter { ch, location: loc }),
        }
    }

    /// Greedy run of digits and decimal points. `1.2.3` is one token.
    fn number_literal(&mut self) -> Token {
        let loc = self.current_location();
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, text, loc)
    }

    /// String literal. `\"` is the only escape; other backslashes are kept as-is.
    fn string_literal(&mut self) -> Result<Token, SyntaxError> {
        let loc = self.current_location();
        self.advance(); // opening quote
        let mut contents = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance(); // closing quote
                return Ok(Token::new(TokenKind::Str, contents, loc));
            }

            if ch == '\\' && self.peek_ahead(1) == Some('"') {
                self.advance();
                self.advance();
                contents.push('"');
            } else {
                contents.push(ch);
                self.advance();
            }
        }

        Err(SyntaxError::UnterminatedString { location: loc })
    }

    /// Identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let mut word = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match Keyword::lookup(&word) {
            Some(kw) => Token::new(TokenKind::Keyword(kw), word, loc),
            None => Token::new(TokenKind::Identifier, word, loc),
        }
    }

    /// Maximal munch: a two-character operator wins over its one-character prefix
    fn operator(&mut self) -> Result<Token, SyntaxError> {
        let loc = self.current_location();
        let Some(first) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", loc));
        };

        if let Some(second) = self.peek_ahead(1) {
            let pair: String = [first, second].iter().collect();
            if let Some(op) = Operator::lookup(&pair) {
                self.advance();
                self.advance();
                return Ok(Token::new(TokenKind::Operator(op), pair, loc));
            }
        }

        let single = first.to_string();
        match Operator::lookup(&single) {
            Some(op) => {
                self.advance();
                Ok(Token::new(TokenKind::Operator(op), single, loc))
            }
            // Lone '&' or '|'
            None => Err(SyntaxError::UnexpectedCharacter {
                ch: first,
                location: loc,
            }),
        }
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    self.skip_line_comment();
                }
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
