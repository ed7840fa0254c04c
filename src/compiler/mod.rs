//! # Compiler
//!
//! Recursive-descent parser and code generator. Consumes the token stream
//! produced by [`crate::lexer`] and emits textual VM assembly understood
//! by [`crate::assembler`]. There is no intermediate AST: each grammar
//! rule emits straight into the current top of a [`CodeBuffer`] as it
//! recognizes the input, in the tradition of a one-pass Pascal-style
//! compiler.
//!
//! ## Grammar
//!
//! ```text
//! program     ::= command*
//! command     ::= declaration ';' | control | assign ';'
//! block       ::= '{' command* '}'
//! declaration ::= 'int' ident ('=' assign)?
//! control     ::= if | while | do-while | for
//! if          ::= 'if' '(' eq-op ')' (block | command) ('else' (block | command))?
//! while       ::= 'while' '(' assign ')' (block | command)
//! do-while    ::= 'do' (block | command) 'while' '(' assign ')'
//! for         ::= 'for' ...   -- rejected: not implemented
//! assign      ::= ident '=' assign | eq-op
//! eq-op       ::= compare-op (('==' | '!=') compare-op)*
//! compare-op  ::= add-op (('<=' | '>=' | '<' | '>') add-op)*
//! add-op      ::= mul-op (('+' | '-') mul-op)*
//! mul-op      ::= factor (('*' | '/') factor)*
//! factor      ::= '(' assign ')' | ident | value
//! ```
//!
//! ## Convention
//!
//! The result of evaluating any expression is left in `r0` when control
//! returns to the caller. Binary operators save the left operand with
//! `push.i32 r0` before evaluating the right operand, then `pop.i32 r1`
//! to recover it, so nested evaluation never clobbers a pending operand.

pub mod buffer;
pub mod symbol_table;

use buffer::CodeBuffer;
use symbol_table::SymbolTable;

use crate::error::{DebugInfo, ErrorKind, ScsError, Stage};
use crate::lexer::token::{Token, TokenKind};

pub struct CompileResult {
    pub assembly: String,
}

pub fn compile(tokens: &[Token]) -> Result<CompileResult, ScsError> {
    let mut compiler = Compiler::new(tokens);
    compiler.program()?;
    Ok(CompileResult { assembly: compiler.buf.finish() })
}

struct Compiler<'a> {
    tokens: &'a [Token],
    pos: usize,
    symbols: SymbolTable,
    buf: CodeBuffer,
    next_offset: u32,
    label_count: u32,
}

impl<'a> Compiler<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            symbols: SymbolTable::new(),
            buf: CodeBuffer::new(),
            next_offset: 0,
            label_count: 0,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ScsError> {
        if self.check(kind) {
            Ok(self.advance())
        } else if self.at_eof() {
            Err(self.error(ErrorKind::UnexpectedEof, "unexpected end of file"))
        } else {
            Err(self.error(
                ErrorKind::UnexpectedToken,
                format!("unexpected token '{}'", self.peek().lexeme),
            ))
        }
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ScsError {
        ScsError::at(Stage::Compile, kind, message, self.debug())
    }

    fn debug(&self) -> DebugInfo {
        self.peek().debug.clone()
    }

    fn new_label(&mut self) -> String {
        let label = format!("L{}", self.label_count);
        self.label_count += 1;
        label
    }

    // program ::= command*
    fn program(&mut self) -> Result<(), ScsError> {
        while !self.at_eof() {
            self.command()?;
        }
        Ok(())
    }

    // block ::= '{' command* '}'
    fn block(&mut self) -> Result<(), ScsError> {
        self.expect(TokenKind::LBrace)?;
        while !self.check(TokenKind::RBrace) {
            if self.at_eof() {
                return Err(self.error(ErrorKind::UnexpectedEof, "unterminated block"));
            }
            self.command()?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn stmt(&mut self) -> Result<(), ScsError> {
        if self.check(TokenKind::LBrace) {
            self.block()
        } else {
            self.command()
        }
    }

    // command ::= declaration ';' | control | assign ';'
    fn command(&mut self) -> Result<(), ScsError> {
        match self.peek().kind {
            TokenKind::Type => {
                self.declaration()?;
                self.expect(TokenKind::Punct)?;
                Ok(())
            }
            TokenKind::If | TokenKind::While | TokenKind::Do => self.control(),
            TokenKind::For => Err(self.error(
                ErrorKind::NotYetImplemented,
                "for loops are not implemented",
            )),
            _ => {
                self.assign()?;
                self.expect(TokenKind::Punct)?;
                Ok(())
            }
        }
    }

    // declaration ::= 'int' ident ('=' assign)?
    fn declaration(&mut self) -> Result<(), ScsError> {
        self.expect(TokenKind::Type)?;
        let name_token = self.expect(TokenKind::Ident)?;
        let offset = self.next_offset;
        self.next_offset += 4;

        if !self.symbols.declare(name_token.lexeme.clone(), offset) {
            return Err(ScsError::at(
                Stage::Compile,
                ErrorKind::DuplicateDeclaration,
                format!("'{}' is already declared", name_token.lexeme),
                name_token.debug,
            ));
        }

        if self.check(TokenKind::Assign) {
            self.advance();
            self.assign()?;
        } else {
            self.buf.emit("mov.reg.i32 r0 0");
        }
        self.buf.emit("push.i32 r0");
        Ok(())
    }

    fn control(&mut self) -> Result<(), ScsError> {
        match self.peek().kind {
            TokenKind::If => self.control_if(),
            TokenKind::While => self.control_while(),
            TokenKind::Do => self.control_do(),
            _ => unreachable!("control() called on a non-control token"),
        }
    }

    // if ::= 'if' '(' eq-op ')' (block | command) ('else' (block | command))?
    fn control_if(&mut self) -> Result<(), ScsError> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        self.eq_op()?;
        self.expect(TokenKind::RParen)?;

        let branch = self.new_label();
        self.buf.emit(&format!("jz {branch}"));
        self.stmt()?;

        if self.check(TokenKind::Else) {
            let end = self.new_label();
            self.buf.emit(&format!("jmp {end}"));
            self.buf.emit_label(&branch);
            self.advance();
            self.stmt()?;
            self.buf.emit_label(&end);
        } else {
            self.buf.emit_label(&branch);
        }
        Ok(())
    }

    // while ::= 'while' '(' assign ')' (block | command)
    fn control_while(&mut self) -> Result<(), ScsError> {
        self.expect(TokenKind::While)?;
        let repeat = self.new_label();
        let brk = self.new_label();

        self.buf.emit_label(&repeat);
        self.expect(TokenKind::LParen)?;
        self.assign()?;
        self.expect(TokenKind::RParen)?;
        self.buf.emit(&format!("jz {brk}"));
        self.stmt()?;
        self.buf.emit(&format!("jmp {repeat}"));
        self.buf.emit_label(&brk);
        Ok(())
    }

    // do-while ::= 'do' (block | command) 'while' '(' assign ')'
    fn control_do(&mut self) -> Result<(), ScsError> {
        self.expect(TokenKind::Do)?;
        let repeat = self.new_label();
        let brk = self.new_label();

        self.buf.emit_label(&repeat);
        self.stmt()?;
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        self.assign()?;
        self.expect(TokenKind::RParen)?;
        self.buf.emit(&format!("jz {brk}"));
        self.buf.emit(&format!("jnz {repeat}"));
        self.buf.emit_label(&brk);
        Ok(())
    }

    fn ident_offset(&self, token: &Token) -> Result<u32, ScsError> {
        self.symbols.get(&token.lexeme).ok_or_else(|| {
            ScsError::at(
                Stage::Compile,
                ErrorKind::UndeclaredIdentifier,
                format!("undeclared identifier '{}'", token.lexeme),
                token.debug.clone(),
            )
        })
    }

    fn is_ident_assign_ahead(&self) -> bool {
        self.check(TokenKind::Ident) && self.peek_at(1).kind == TokenKind::Assign
    }

    // assign ::= ident '=' assign | eq-op
    //
    // Only commits to the assignment-chain reading when an '=' directly
    // follows the identifier; otherwise the identifier is just the start
    // of a value expression and falls through to eq_op (so `x;` reads x,
    // and `while (x < 5)` can reach the comparison at all).
    fn assign(&mut self) -> Result<(), ScsError> {
        if !self.is_ident_assign_ahead() {
            return self.eq_op();
        }

        let name_token = self.advance();
        let offset = self.ident_offset(&name_token)?;
        self.expect(TokenKind::Assign)?;

        self.buf.push();
        self.assign()?;
        let inner = self.buf.pop();
        self.buf.emit_raw(&inner);
        self.buf.emit(&format!("mov.mem.reg.i32 [sp+{offset}] r0"));
        Ok(())
    }

    // eq-op ::= compare-op (('==' | '!=') compare-op)*
    fn eq_op(&mut self) -> Result<(), ScsError> {
        self.compare_op()?;
        loop {
            let mnemonic = match self.peek().kind {
                TokenKind::Equal => "cmpeq.i32",
                TokenKind::NotEqual => "cmpneq.i32",
                _ => break,
            };
            self.advance();
            self.buf.emit("push.i32 r0");
            self.compare_op()?;
            self.buf.emit("pop.i32 r1");
            self.buf.emit(&format!("{mnemonic} r0 r1"));
        }
        Ok(())
    }

    // compare-op ::= add-op (('<=' | '>=' | '<' | '>') add-op)*
    fn compare_op(&mut self) -> Result<(), ScsError> {
        self.add_op()?;
        loop {
            let mnemonic = match self.peek().kind {
                TokenKind::LEqual => "cmpleq.i32",
                TokenKind::GEqual => "cmpgeq.i32",
                TokenKind::Less => "cmpless.i32",
                TokenKind::Greater => "cmpgreater.i32",
                _ => break,
            };
            self.advance();
            self.buf.emit("push.i32 r0");
            self.add_op()?;
            self.buf.emit("pop.i32 r1");
            self.buf.emit(&format!("{mnemonic} r1 r0"));
        }
        Ok(())
    }

    // add-op ::= mul-op (('+' | '-') mul-op)*
    fn add_op(&mut self) -> Result<(), ScsError> {
        self.mul_op()?;
        loop {
            match self.peek().kind {
                TokenKind::Add => {
                    self.advance();
                    self.buf.emit("push.i32 r0");
                    self.mul_op()?;
                    self.buf.emit("pop.i32 r1");
                    self.buf.emit("add.i32 r0 r1");
                }
                TokenKind::Sub => {
                    self.advance();
                    self.buf.emit("push.i32 r0");
                    self.mul_op()?;
                    self.buf.emit("pop.i32 r1");
                    self.buf.emit("sub.i32 r0 r1");
                    self.buf.emit("neg.i32 r0");
                }
                _ => break,
            }
        }
        Ok(())
    }

    // mul-op ::= factor (('*' | '/') factor)*
    fn mul_op(&mut self) -> Result<(), ScsError> {
        self.factor()?;
        loop {
            match self.peek().kind {
                TokenKind::Mul => {
                    self.advance();
                    self.buf.emit("push.i32 r0");
                    self.factor()?;
                    self.buf.emit("pop.i32 r1");
                    self.buf.emit("mul.i32 r0 r1");
                }
                TokenKind::Div => {
                    self.advance();
                    self.buf.emit("push.i32 r0");
                    self.factor()?;
                    self.buf.emit("pop.i32 r1");
                    self.buf.emit("div.i32 r1 r0");
                    self.buf.emit("mov.reg.reg r0 r1");
                }
                _ => break,
            }
        }
        Ok(())
    }

    // factor ::= '(' assign ')' | ident | value
    fn factor(&mut self) -> Result<(), ScsError> {
        match self.peek().kind {
            TokenKind::LParen => {
                self.advance();
                self.assign()?;
                self.expect(TokenKind::RParen)?;
                Ok(())
            }
            TokenKind::Ident => {
                let token = self.advance();
                let offset = self.ident_offset(&token)?;
                self.buf.emit(&format!("mov.reg.mem.i32 r0 [sp+{offset}]"));
                Ok(())
            }
            TokenKind::Value => {
                let token = self.advance();
                self.buf.emit(&format!("mov.reg.i32 r0 {}", token.lexeme));
                Ok(())
            }
            _ => Err(self.error(
                ErrorKind::UnexpectedToken,
                format!("expected an expression, found '{}'", self.peek().lexeme),
            )),
        }
    }
}

#[cfg(test)]
mod tests;
