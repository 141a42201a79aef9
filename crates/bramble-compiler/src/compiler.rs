// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! Single-pass Pratt parser. Drives `bramble_scanner::Scanner` token by
//! token and emits directly into a `Chunk` — there is no intermediate AST.

#[cfg(test)]
mod compiler_test;

use bramble_core::Heap;
use bramble_scanner::{Scanner, Token, TokenKind};

use crate::chunk::Chunk;
use crate::error::{CompileError, ErrorSite};
use crate::op;
use crate::precedence::{Precedence, infix_precedence};

/// Compile `source` into a `Chunk`. On success every statement has been
/// translated and a final `RETURN` emitted. On failure, the partially
/// emitted chunk is discarded by the caller — parsing continues past the
/// first error (suppressing cascades via panic mode) so every mistake in
/// the source is reported in one pass.
pub fn compile(source: &str, heap: &mut Heap) -> Result<Chunk, Vec<CompileError>> {
    let mut compiler = Compiler::new(source, heap);
    compiler.run()
}

struct Compiler<'src, 'h> {
    scanner: Scanner<'src>,
    heap: &'h mut Heap,
    chunk: Chunk,
    previous: Token<'src>,
    current: Token<'src>,
    errors: Vec<CompileError>,
    panic_mode: bool,
}

impl<'src, 'h> Compiler<'src, 'h> {
    fn new(source: &'src str, heap: &'h mut Heap) -> Self {
        let dummy = Token::new(TokenKind::Eof, "", 0);
        Self {
            scanner: Scanner::new(source),
            heap,
            chunk: Chunk::new(),
            previous: dummy,
            current: dummy,
            errors: Vec::new(),
            panic_mode: false,
        }
    }

    fn run(mut self) -> Result<Chunk, Vec<CompileError>> {
        self.advance();
        while !self.check(TokenKind::Eof) {
            self.declaration();
        }
        self.consume(TokenKind::Eof, "Expect end of expression.");
        self.emit_byte(op::RETURN);

        if self.errors.is_empty() {
            Ok(self.chunk)
        } else {
            Err(self.errors)
        }
    }

    // --- token stream plumbing -------------------------------------------------

    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.scanner.scan_token();
            if self.current.kind != TokenKind::Error {
                break;
            }
            self.error_at_current(self.current.lexeme.to_string());
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.check(kind) {
            self.advance();
        } else {
            self.error_at_current(message.to_string());
        }
    }

    fn error_at_current(&mut self, message: String) {
        let token = self.current;
        self.error_at(token, message);
    }

    fn error(&mut self, message: String) {
        let token = self.previous;
        self.error_at(token, message);
    }

    fn error_at(&mut self, token: Token<'src>, message: String) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;

        let site = if token.kind == TokenKind::Error {
            ErrorSite::LexError
        } else if token.kind == TokenKind::Eof {
            ErrorSite::End
        } else {
            ErrorSite::Token(token.lexeme.to_string())
        };

        self.errors.push(CompileError {
            line: token.line,
            site,
            message,
        });
    }

    fn synchronize(&mut self) {
        self.panic_mode = false;

        while self.current.kind != TokenKind::Eof {
            if self.previous.kind == TokenKind::Semicolon {
                return;
            }
            match self.current.kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => self.advance(),
            }
        }
    }

    // --- bytecode emission -------------------------------------------------

    fn emit_byte(&mut self, byte: u8) {
        self.chunk.write(byte, self.previous.line);
    }

    fn emit_bytes(&mut self, a: u8, b: u8) {
        self.emit_byte(a);
        self.emit_byte(b);
    }

    fn emit_constant(&mut self, value: bramble_core::Value) {
        match self.chunk.add_constant(value) {
            Some(index) => self.emit_bytes(op::CONSTANT, index),
            None => self.error("Too many constants in one chunk.".to_string()),
        }
    }

    /// Intern `name` and add it to the constant pool, returning its
    /// index — shared by variable declarations and variable expressions.
    fn identifier_constant(&mut self, name: &str) -> Option<u8> {
        let handle = self.heap.intern(name.as_bytes());
        let index = self
            .chunk
            .add_constant(bramble_core::Value::Obj(handle));
        if index.is_none() {
            self.error("Too many constants in one chunk.".to_string());
        }
        index
    }

    // --- statements -------------------------------------------------

    fn declaration(&mut self) {
        if self.match_token(TokenKind::Var) {
            self.var_declaration();
        } else {
            self.statement();
        }

        if self.panic_mode {
            self.synchronize();
        }
    }

    fn var_declaration(&mut self) {
        self.consume(TokenKind::Identifier, "Expect variable name.");
        let name = self.previous.lexeme.to_string();
        let Some(global) = self.identifier_constant(&name) else {
            return;
        };

        if self.match_token(TokenKind::Equal) {
            self.expression();
        } else {
            self.emit_byte(op::NIL);
        }

        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.");
        self.emit_bytes(op::DEFINE_GLOBAL, global);
    }

    fn statement(&mut self) {
        if self.match_token(TokenKind::Print) {
            self.print_statement();
        } else {
            self.expression_statement();
        }
    }

    fn print_statement(&mut self) {
        self.expression();
        self.consume(TokenKind::Semicolon, "Expect ';' after value.");
        self.emit_byte(op::PRINT);
    }

    fn expression_statement(&mut self) {
        self.expression();
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.");
        self.emit_byte(op::POP);
    }

    // --- expressions (Pratt parser) -------------------------------------------------

    fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();
        let can_assign = precedence <= Precedence::Assignment;

        if !self.prefix_rule(self.previous.kind, can_assign) {
            self.error("Expect expression.".to_string());
            return;
        }

        while precedence <= infix_precedence(self.current.kind) {
            self.advance();
            self.infix_rule(self.previous.kind);
        }

        if can_assign && self.match_token(TokenKind::Equal) {
            self.error("Invalid assignment target.".to_string());
        }
    }

    /// Returns `false` if `kind` has no prefix rule.
    fn prefix_rule(&mut self, kind: TokenKind, can_assign: bool) -> bool {
        match kind {
            TokenKind::LeftParen => self.grouping(),
            TokenKind::Minus | TokenKind::Bang => self.unary(),
            TokenKind::Number => self.number(),
            TokenKind::String => self.string(),
            TokenKind::Identifier => self.variable(can_assign),
            TokenKind::Nil => self.emit_byte(op::NIL),
            TokenKind::True => self.emit_byte(op::TRUE),
            TokenKind::False => self.emit_byte(op::FALSE),
            _ => return false,
        }
        true
    }

    fn infix_rule(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::EqualEqual
            | TokenKind::BangEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Less
            | TokenKind::LessEqual => self.binary(kind),
            _ => {}
        }
    }

    fn grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after expression.");
    }

    fn unary(&mut self) {
        let operator = self.previous.kind;
        self.parse_precedence(Precedence::Unary);
        match operator {
            TokenKind::Minus => self.emit_byte(op::NEGATE),
            TokenKind::Bang => self.emit_byte(op::NOT),
            _ => unreachable!("unary() only called for - and !"),
        }
    }

    fn binary(&mut self, operator: TokenKind) {
        let precedence = infix_precedence(operator);
        self.parse_precedence(precedence.next());

        match operator {
            TokenKind::Plus => self.emit_byte(op::ADD),
            TokenKind::Minus => self.emit_byte(op::SUBTRACT),
            TokenKind::Star => self.emit_byte(op::MULTIPLY),
            TokenKind::Slash => self.emit_byte(op::DIVIDE),
            TokenKind::EqualEqual => self.emit_byte(op::EQUAL),
            TokenKind::BangEqual => self.emit_bytes(op::EQUAL, op::NOT),
            TokenKind::Greater => self.emit_byte(op::GREATER),
            TokenKind::GreaterEqual => self.emit_bytes(op::LESS, op::NOT),
            TokenKind::Less => self.emit_byte(op::LESS),
            TokenKind::LessEqual => self.emit_bytes(op::GREATER, op::NOT),
            _ => unreachable!("binary() only called for operator tokens"),
        }
    }

    fn number(&mut self) {
        let value: f64 = self.previous.lexeme.parse().unwrap_or(f64::NAN);
        self.emit_constant(bramble_core::Value::Number(value));
    }

    fn string(&mut self) {
        // Strip the surrounding quotes; raw bytes, no escape processing.
        let lexeme = self.previous.lexeme;
        let inner = &lexeme[1..lexeme.len() - 1];
        let handle = self.heap.intern(inner.as_bytes());
        self.emit_constant(bramble_core::Value::Obj(handle));
    }

    fn variable(&mut self, can_assign: bool) {
        let name = self.previous.lexeme.to_string();
        let Some(arg) = self.identifier_constant(&name) else {
            return;
        };

        if can_assign && self.match_token(TokenKind::Equal) {
            self.expression();
            self.emit_bytes(op::SET_GLOBAL, arg);
        } else {
            self.emit_bytes(op::GET_GLOBAL, arg);
        }
    }
}
