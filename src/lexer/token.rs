//! # Token types
//!
//! The lexer's output vocabulary. The lexeme text lives on [`Token`] itself
//! rather than inside [`TokenKind`], so matching on the kind stays cheap
//! and exhaustive.

use crate::error::DebugInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Add,
    Sub,
    Mul,
    Div,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LEqual,
    GEqual,
    Less,
    Greater,
    Equal,
    NotEqual,
    Assign,
    Punct,
    Type,
    If,
    Else,
    Do,
    While,
    For,
    Ident,
    Value,
    Eof,
}

impl TokenKind {
    /// Printable name used by the tokenized dump (§6 of the spec this
    /// crate implements): one name per line, lexeme appended for
    /// `Ident`/`Value`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Add => "ADD",
            TokenKind::Sub => "SUB",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LEqual => "LEQUAL",
            TokenKind::GEqual => "GEQUAL",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOTEQUAL",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Punct => "PUNCT",
            TokenKind::Type => "TYPE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Do => "DO",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Ident => "IDENT",
            TokenKind::Value => "VALUE",
            TokenKind::Eof => "EOF",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub debug: DebugInfo,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, debug: DebugInfo) -> Self {
        Self { kind, lexeme: lexeme.into(), debug }
    }
}
