//! The Vela parser: a recursive-descent statement parser with a nested
//! precedence-climbing expression parser, per `spec.md` §4.3.
//!
//! The parser owns a single forward-only cursor over the token slice — no
//! backtracking, mirroring the lexer's single-lookahead discipline one
//! level up. `parse` is the only public entry point, returning the root of
//! the AST (`None` for a source with no statements, per `spec.md` §8's
//! empty-source boundary case).

pub mod ast;

#[cfg(test)]
mod tests;

use crate::error::CompileError;
use crate::lexer::grammar::grammar_entry;
use crate::lexer::token::{Token, TokenKind};
use ast::AstNode;

/// Parse a full token sequence (as produced by [`crate::lexer::tokenize`])
/// into an AST. Returns `None` for a program with no statements.
pub fn parse(tokens: &[Token]) -> Result<Option<AstNode>, CompileError> {
    let mut parser = Parser::new(tokens);
    parser.program()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn at_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Consume and return the current token. Never advances past the
    /// trailing `Eof`.
    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if !matches!(tok.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        tok
    }

    /// Assert the current token's kind matches `expected` (compared by
    /// discriminant only — payload is irrelevant for the fixed-shape kinds
    /// this is used with), advance on match, else a fatal parse error.
    fn expect(&mut self, expected: TokenKind) -> Result<Token, CompileError> {
        let found = self.current().clone();
        if std::mem::discriminant(&found.kind) == std::mem::discriminant(&expected) {
            Ok(self.advance())
        } else {
            Err(CompileError::parse(
                format!(
                    "expected {}, found {}",
                    expected.symbol(),
                    found.kind.symbol()
                ),
                found.span,
            ))
        }
    }

    // --- top level -----------------------------------------------------

    fn program(&mut self) -> Result<Option<AstNode>, CompileError> {
        let mut result: Option<AstNode> = None;
        while !self.at_eof() {
            let stmt = self.statement()?;
            result = Some(AstNode::sequence(result, stmt));
        }
        Ok(result)
    }

    // --- statements ------------------------------------------------------

    fn statement(&mut self) -> Result<Option<AstNode>, CompileError> {
        match &self.current().kind {
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Print => self.print_statement(),
            TokenKind::Identifier(_) => self.assign_statement(),
            TokenKind::Lbrace => self.block_statement(),
            TokenKind::Semi => {
                self.advance();
                Ok(None)
            }
            TokenKind::Eof => Ok(None),
            other => Err(CompileError::parse(
                format!("statement cannot begin with token {}", other.symbol()),
                self.current().span,
            )),
        }
    }

    fn if_statement(&mut self) -> Result<Option<AstNode>, CompileError> {
        self.advance(); // 'if'
        self.expect(TokenKind::Lparen)?;
        let cond = self.expression(0, false)?;
        self.expect(TokenKind::Rparen)?;
        let then_branch = self.statement()?;
        let else_branch = if matches!(self.current().kind, TokenKind::Else) {
            self.advance();
            self.statement()?
        } else {
            None
        };
        let inner = AstNode::If(then_branch.map(Box::new), else_branch.map(Box::new));
        Ok(Some(AstNode::If(
            Some(Box::new(cond)),
            Some(Box::new(inner)),
        )))
    }

    fn while_statement(&mut self) -> Result<Option<AstNode>, CompileError> {
        self.advance(); // 'while'
        self.expect(TokenKind::Lparen)?;
        let cond = self.expression(0, false)?;
        self.expect(TokenKind::Rparen)?;
        let body = self.statement()?;
        Ok(Some(AstNode::While(Box::new(cond), body.map(Box::new))))
    }

    fn print_statement(&mut self) -> Result<Option<AstNode>, CompileError> {
        self.advance(); // 'print'
        self.expect(TokenKind::Lparen)?;
        let mut items: Option<AstNode> = None;
        loop {
            let item = if let TokenKind::String(text) = &self.current().kind {
                let text = text.clone();
                self.advance();
                AstNode::Prts(Box::new(AstNode::Str(text)))
            } else {
                let expr = self.expression(0, false)?;
                AstNode::Prti(Box::new(expr))
            };
            items = Some(AstNode::sequence(items, Some(item)));
            if matches!(self.current().kind, TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }
        self.expect(TokenKind::Rparen)?;
        self.expect(TokenKind::Semi)?;
        Ok(items)
    }

    fn assign_statement(&mut self) -> Result<Option<AstNode>, CompileError> {
        let TokenKind::Identifier(name) = self.current().kind.clone() else {
            unreachable!("assign_statement called on a non-identifier token")
        };
        self.advance();
        let ident = AstNode::Ident(name);
        self.expect(TokenKind::Assign)?;
        let expr = self.expression(0, true)?;
        self.expect(TokenKind::Semi)?;
        Ok(Some(AstNode::Assign(Box::new(ident), Box::new(expr))))
    }

    fn block_statement(&mut self) -> Result<Option<AstNode>, CompileError> {
        self.advance(); // '{'
        let mut result: Option<AstNode> = None;
        while !matches!(self.current().kind, TokenKind::Rbrace | TokenKind::Eof) {
            let stmt = self.statement()?;
            result = Some(AstNode::sequence(result, stmt));
        }
        self.expect(TokenKind::Rbrace)?;
        Ok(result)
    }

    // --- expressions -----------------------------------------------------
    //
    // Precedence climbing: `expression` parses a `primary` then repeatedly
    // folds in binary operators that bind at least as tightly as
    // `min_precedence`. `allow_input` is threaded unchanged through every
    // recursive call it reaches, so it stays true anywhere inside the
    // right-hand side of an `Assign` — not only when that expression *is*
    // the whole right-hand side. This is a deliberate widening over
    // `spec.md` §9 Open Question 2's original restriction (direct, whole
    // right-hand side only); `x = 1 + input("p");` is accepted on purpose.

    fn expression(&mut self, min_precedence: i8, allow_input: bool) -> Result<AstNode, CompileError> {
        let mut left = self.primary(allow_input)?;
        loop {
            let Some(entry) = grammar_entry(&self.current().kind) else {
                break;
            };
            if entry.precedence < min_precedence {
                break;
            }
            let op_kind = self.current().kind.clone();
            self.advance();
            let next_min = entry.precedence + if entry.right_associative { 0 } else { 1 };
            let right = self.expression(next_min, allow_input)?;
            left = fold_binary(&op_kind, left, right)?;
        }
        Ok(left)
    }

    fn primary(&mut self, allow_input: bool) -> Result<AstNode, CompileError> {
        match self.current().kind.clone() {
            TokenKind::Not => {
                self.advance();
                let inner = self.primary(allow_input)?;
                Ok(AstNode::Not(Box::new(inner)))
            }
            TokenKind::Sub => {
                self.advance();
                let inner = self.primary(allow_input)?;
                Ok(AstNode::Negate(Box::new(inner)))
            }
            TokenKind::Add => {
                self.advance();
                self.primary(allow_input)
            }
            TokenKind::Integer(value) => {
                self.advance();
                Ok(AstNode::Integer(value))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(AstNode::Ident(name))
            }
            TokenKind::Input => {
                let span = self.current().span;
                self.advance();
                self.expect(TokenKind::Lparen)?;
                let prompt = self.expect_string()?;
                self.expect(TokenKind::Rparen)?;
                if !allow_input {
                    return Err(CompileError::parse(
                        "input may only appear as the right-hand side of an assignment",
                        span,
                    ));
                }
                Ok(AstNode::sequence(
                    Some(AstNode::Input(Box::new(AstNode::Str(prompt)))),
                    None,
                ))
            }
            TokenKind::Lparen => {
                self.advance();
                let inner = self.expression(0, allow_input)?;
                self.expect(TokenKind::Rparen)?;
                Ok(inner)
            }
            other => Err(CompileError::parse(
                format!("unexpected token in expression: {}", other.symbol()),
                self.current().span,
            )),
        }
    }

    fn expect_string(&mut self) -> Result<String, CompileError> {
        match self.current().kind.clone() {
            TokenKind::String(text) => {
                self.advance();
                Ok(text)
            }
            other => Err(CompileError::parse(
                format!("expected a string literal, found {}", other.symbol()),
                self.current().span,
            )),
        }
    }
}

/// Fold a binary operator token and its two already-parsed operands into
/// the matching `AstNode` variant, per `spec.md` §3's grammar table.
fn fold_binary(kind: &TokenKind, left: AstNode, right: AstNode) -> Result<AstNode, CompileError> {
    let (l, r) = (Box::new(left), Box::new(right));
    Ok(match kind {
        TokenKind::Add => AstNode::Add(l, r),
        TokenKind::Sub => AstNode::Sub(l, r),
        TokenKind::Mul => AstNode::Mul(l, r),
        TokenKind::Div => AstNode::Div(l, r),
        TokenKind::Mod => AstNode::Mod(l, r),
        TokenKind::Eq => AstNode::Eq(l, r),
        TokenKind::Neq => AstNode::Neq(l, r),
        TokenKind::Lss => AstNode::Lss(l, r),
        TokenKind::Gtr => AstNode::Gtr(l, r),
        TokenKind::Leq => AstNode::Leq(l, r),
        TokenKind::Geq => AstNode::Geq(l, r),
        TokenKind::And => AstNode::And(l, r),
        TokenKind::Or => AstNode::Or(l, r),
        other => {
            return Err(CompileError::internal(format!(
                "grammar table produced an entry for non-operator token {}",
                other.symbol()
            )))
        }
    })
}
