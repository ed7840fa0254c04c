//! # Lexer
//!
//! Tokenizes preprocessed source text into a stream of [`Token`]s.
//!
//! ## Features
//!
//! - **Keywords**: `int`, `if`, `else`, `do`, `while`, `for`
//! - **Operators**: `+ - * / = == != < > <= >=`
//! - **Punctuation**: `( ) { } ;`
//! - **Identifiers and integer literals**
//! - **Debug markers**: consumes the `<|>line|file<|>` markers the
//!   preprocessor inserts and uses them to stamp every token's
//!   [`DebugInfo`](crate::error::DebugInfo)
//!
//! A single unrecognized character aborts tokenization immediately; there
//! is no error recovery or resynchronization.

pub mod cursor;
pub mod token;

use cursor::Cursor;
use token::{Token, TokenKind};

use crate::error::{DebugInfo, ErrorKind, ScsError, Stage};

pub struct LexResult {
    pub tokens: Vec<Token>,
}

/// Render a tokenized dump: one token's printable name per line, with its
/// lexeme appended for `Ident`/`Value` tokens. Intended as a debugging
/// artifact written alongside the other intermediate pipeline stages.
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(token.kind.name());
        if matches!(token.kind, TokenKind::Ident | TokenKind::Value) {
            out.push(' ');
            out.push_str(&token.lexeme);
        }
        out.push('\n');
    }
    out
}

/// Tokenize preprocessed `source`. `source` is expected to already carry
/// `<|>line|file<|>` markers, as produced by [`crate::preprocessor::preprocess`].
pub fn tokenize(source: &str) -> Result<LexResult, ScsError> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    let mut debug = DebugInfo::default();

    loop {
        skip_whitespace(&mut cursor);
        if cursor.is_at_end() {
            break;
        }

        if cursor.starts_with("<|>") {
            debug = lex_marker(&mut cursor, &debug)?;
            continue;
        }

        if let Some(token) = lex_token(&mut cursor, &debug)? {
            tokens.push(token);
        }
    }

    tokens.push(Token::new(TokenKind::Eof, "", debug));
    Ok(LexResult { tokens })
}

fn skip_whitespace(cursor: &mut Cursor) {
    while matches!(cursor.peek(), Some(c) if c.is_whitespace()) {
        cursor.advance();
    }
}

fn lex_marker(cursor: &mut Cursor, current: &DebugInfo) -> Result<DebugInfo, ScsError> {
    cursor.eat("<|>");
    let mut body = String::new();
    loop {
        if cursor.starts_with("<|>") {
            cursor.eat("<|>");
            break;
        }
        match cursor.advance() {
            Some(c) => body.push(c),
            None => {
                return Err(ScsError::at(
                    Stage::Lex,
                    ErrorKind::UnterminatedMarker,
                    "unterminated debug marker",
                    current.clone(),
                ))
            }
        }
    }

    let (line_str, file) = body.split_once('|').ok_or_else(|| {
        ScsError::at(
            Stage::Lex,
            ErrorKind::InvalidMarker,
            format!("malformed debug marker '{body}'"),
            current.clone(),
        )
    })?;
    let line: usize = line_str.parse().map_err(|_| {
        ScsError::at(
            Stage::Lex,
            ErrorKind::InvalidMarker,
            format!("malformed debug marker '{body}'"),
            current.clone(),
        )
    })?;

    Ok(DebugInfo::new(file, line))
}

fn lex_token(cursor: &mut Cursor, debug: &DebugInfo) -> Result<Option<Token>, ScsError> {
    let c = cursor.peek().expect("caller checked is_at_end");

    macro_rules! single {
        ($kind:expr, $lexeme:expr) => {{
            cursor.advance();
            Ok(Some(Token::new($kind, $lexeme, debug.clone())))
        }};
    }

    match c {
        '+' => single!(TokenKind::Add, "+"),
        '-' => single!(TokenKind::Sub, "-"),
        '*' => single!(TokenKind::Mul, "*"),
        '/' => single!(TokenKind::Div, "/"),
        '(' => single!(TokenKind::LParen, "("),
        ')' => single!(TokenKind::RParen, ")"),
        '{' => single!(TokenKind::LBrace, "{"),
        '}' => single!(TokenKind::RBrace, "}"),
        ';' => single!(TokenKind::Punct, ";"),
        '=' => {
            if cursor.peek_at(1) == Some('=') {
                cursor.advance();
                cursor.advance();
                Ok(Some(Token::new(TokenKind::Equal, "==", debug.clone())))
            } else {
                cursor.advance();
                Ok(Some(Token::new(TokenKind::Assign, "=", debug.clone())))
            }
        }
        '!' => {
            if cursor.peek_at(1) == Some('=') {
                cursor.advance();
                cursor.advance();
                Ok(Some(Token::new(TokenKind::NotEqual, "!=", debug.clone())))
            } else {
                Err(unexpected_character(c, debug))
            }
        }
        '<' => {
            if cursor.peek_at(1) == Some('=') {
                cursor.advance();
                cursor.advance();
                Ok(Some(Token::new(TokenKind::LEqual, "<=", debug.clone())))
            } else {
                cursor.advance();
                Ok(Some(Token::new(TokenKind::Less, "<", debug.clone())))
            }
        }
        '>' => {
            if cursor.peek_at(1) == Some('=') {
                cursor.advance();
                cursor.advance();
                Ok(Some(Token::new(TokenKind::GEqual, ">=", debug.clone())))
            } else {
                cursor.advance();
                Ok(Some(Token::new(TokenKind::Greater, ">", debug.clone())))
            }
        }
        c if c.is_ascii_digit() => Ok(Some(lex_number(cursor, debug))),
        c if is_ident_start(c) => Ok(Some(lex_word(cursor, debug))),
        _ => Err(unexpected_character(c, debug)),
    }
}

fn unexpected_character(c: char, debug: &DebugInfo) -> ScsError {
    ScsError::at(
        Stage::Lex,
        ErrorKind::UnexpectedCharacter,
        format!("unexpected character '{c}'"),
        debug.clone(),
    )
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn lex_number(cursor: &mut Cursor, debug: &DebugInfo) -> Token {
    let mut lexeme = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        lexeme.push(cursor.advance().unwrap());
    }
    Token::new(TokenKind::Value, lexeme, debug.clone())
}

fn lex_word(cursor: &mut Cursor, debug: &DebugInfo) -> Token {
    let mut lexeme = String::new();
    while matches!(cursor.peek(), Some(c) if is_ident_continue(c)) {
        lexeme.push(cursor.advance().unwrap());
    }

    let kind = match lexeme.as_str() {
        "int" => TokenKind::Type,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "do" => TokenKind::Do,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        _ => TokenKind::Ident,
    };

    Token::new(kind, lexeme, debug.clone())
}

#[cfg(test)]
mod tests;
