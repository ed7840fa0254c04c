use crate::error::ErrorKind;
use crate::lexer::token::TokenKind;
use crate::lexer::{dump_tokens, tokenize};
use crate::preprocessor::preprocess;

fn lex_ok(source: &str) -> Vec<TokenKind> {
    let preprocessed = preprocess(source, "t.scs");
    let result = tokenize(&preprocessed).expect("expected successful lex");
    result.tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn tokenizes_declaration() {
    let kinds = lex_ok("int x = 5;");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Type,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Value,
            TokenKind::Punct,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn tokenizes_comparison_and_keywords() {
    let kinds = lex_ok("while (x <= 10) { x = x + 1; }");
    assert_eq!(
        kinds,
        vec![
            TokenKind::While,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::LEqual,
            TokenKind::Value,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Ident,
            TokenKind::Add,
            TokenKind::Value,
            TokenKind::Punct,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn distinguishes_assign_and_equal() {
    assert_eq!(lex_ok("=")[0], TokenKind::Assign);
    assert_eq!(lex_ok("==")[0], TokenKind::Equal);
}

#[test]
fn strips_comments_before_lexing() {
    let kinds = lex_ok("int x; // trailing comment\n");
    assert_eq!(
        kinds,
        vec![TokenKind::Type, TokenKind::Ident, TokenKind::Punct, TokenKind::Eof]
    );
}

#[test]
fn unknown_character_is_fatal() {
    let preprocessed = preprocess("int x = 5 @ 2;", "t.scs");
    let err = tokenize(&preprocessed).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
}

#[test]
fn dump_prints_one_name_per_token_with_lexeme_for_ident_and_value() {
    let preprocessed = preprocess("int x = 5;", "t.scs");
    let result = tokenize(&preprocessed).unwrap();
    assert_eq!(
        dump_tokens(&result.tokens),
        "TYPE\nIDENT x\nASSIGN\nVALUE 5\nPUNCT\nEOF\n"
    );
}

#[test]
fn tracks_line_numbers_from_markers() {
    let preprocessed = preprocess("int x;\nint y;\n", "t.scs");
    let result = tokenize(&preprocessed).unwrap();
    let y_token = result
        .tokens
        .iter()
        .find(|t| t.lexeme == "y")
        .expect("y token present");
    assert_eq!(y_token.debug.line, 2);
    assert_eq!(y_token.debug.file, "t.scs");
}
