//! The Vela lexer.
//!
//! A single-character-lookahead scanner (`spec.md` §4.2) driven by
//! [`tokenize`], which repeatedly calls the one-token-at-a-time scan step
//! until it produces `Eof`, appending each token to the returned sequence
//! (invariant (b): the sequence ends with exactly one `Eof`).

pub mod grammar;
pub mod token;

#[cfg(test)]
mod tests;

use crate::cursor::Cursor;
use crate::error::{CompileError, Span};
use token::{Token, TokenKind};

/// Tokenize `source` in full. Aborts on the first lex error, per `spec.md`
/// §7's "report once, abort" policy.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = next_token(&mut cursor)?;
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    Ok(tokens)
}

fn next_token(cursor: &mut Cursor) -> Result<Token, CompileError> {
    skip_whitespace(cursor);

    let (line, col) = cursor.position();
    let span = Span::new(line, col);

    let Some(ch) = cursor.peek() else {
        return Ok(Token::new(TokenKind::Eof, span));
    };

    match ch {
        '{' => single(cursor, span, TokenKind::Lbrace),
        '}' => single(cursor, span, TokenKind::Rbrace),
        '(' => single(cursor, span, TokenKind::Lparen),
        ')' => single(cursor, span, TokenKind::Rparen),
        '/' => single(cursor, span, TokenKind::Div),
        '*' => single(cursor, span, TokenKind::Mul),
        '%' => single(cursor, span, TokenKind::Mod),
        ';' => single(cursor, span, TokenKind::Semi),
        ',' => single(cursor, span, TokenKind::Comma),
        '+' => single(cursor, span, TokenKind::Add),
        '-' => single(cursor, span, TokenKind::Sub),

        '<' => compound(cursor, span, '=', TokenKind::Leq, TokenKind::Lss),
        '>' => compound(cursor, span, '=', TokenKind::Geq, TokenKind::Gtr),
        '=' => compound(cursor, span, '=', TokenKind::Eq, TokenKind::Assign),
        '!' => compound(cursor, span, '=', TokenKind::Neq, TokenKind::Not),

        '&' => {
            if cursor.peek2() == Some('&') {
                cursor.advance();
                cursor.advance();
                Ok(Token::new(TokenKind::And, span))
            } else {
                Err(CompileError::lex("illegal token '&'", span))
            }
        }
        '|' => {
            if cursor.peek2() == Some('|') {
                cursor.advance();
                cursor.advance();
                Ok(Token::new(TokenKind::Or, span))
            } else {
                Err(CompileError::lex("illegal token '|'", span))
            }
        }

        '"' => lex_string(cursor, span),

        c if c.is_ascii_alphanumeric() || c == '_' => lex_word(cursor, span),

        other => Err(CompileError::lex(
            format!("unrecognised character '{other}'"),
            span,
        )),
    }
}

fn skip_whitespace(cursor: &mut Cursor) {
    while matches!(cursor.peek(), Some(c) if c.is_whitespace()) {
        cursor.advance();
    }
}

fn single(cursor: &mut Cursor, span: Span, kind: TokenKind) -> Result<Token, CompileError> {
    cursor.advance();
    Ok(Token::new(kind, span))
}

/// Handle a `< > = !` lookahead: if the next character is `second`, consume
/// both and yield `compound_kind`; otherwise consume one and yield
/// `simple_kind`.
fn compound(
    cursor: &mut Cursor,
    span: Span,
    second: char,
    compound_kind: TokenKind,
    simple_kind: TokenKind,
) -> Result<Token, CompileError> {
    cursor.advance();
    if cursor.peek() == Some(second) {
        cursor.advance();
        Ok(Token::new(compound_kind, span))
    } else {
        Ok(Token::new(simple_kind, span))
    }
}

fn lex_string(cursor: &mut Cursor, span: Span) -> Result<Token, CompileError> {
    cursor.advance(); // opening '"'
    let mut text = String::new();
    loop {
        match cursor.peek() {
            None => return Err(CompileError::lex("unterminated string literal", span)),
            Some('\n') => return Err(CompileError::lex("unterminated string literal", span)),
            Some('"') => {
                cursor.advance();
                break;
            }
            Some(c) => {
                text.push(c);
                cursor.advance();
            }
        }
    }
    Ok(Token::new(TokenKind::String(text), span))
}

/// Collect a maximal run of `[A-Za-z0-9_]` and classify it as a keyword, an
/// integer literal (`^[-+]?[0-9]+$`, though the sign is never actually
/// collected here since `+`/`-` are lexed as their own tokens first — an
/// unsigned digit run is the only shape this function ever sees), or an
/// identifier.
fn lex_word(cursor: &mut Cursor, span: Span) -> Result<Token, CompileError> {
    let mut text = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
        text.push(cursor.advance().unwrap());
    }

    if text.is_empty() {
        let found = cursor.peek().unwrap();
        return Err(CompileError::lex(
            format!("unrecognised character '{found}'"),
            span,
        ));
    }

    let kind = match text.as_str() {
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "print" => TokenKind::Print,
        "input" => TokenKind::Input,
        _ if text.bytes().all(|b| b.is_ascii_digit()) => {
            let value: i64 = text
                .parse()
                .map_err(|_| CompileError::lex(format!("integer literal out of range: {text}"), span))?;
            TokenKind::Integer(value)
        }
        _ => TokenKind::Identifier(text),
    };

    Ok(Token::new(kind, span))
}
