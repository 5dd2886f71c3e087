//! Tokenizer for arithmetic expressions.

use super::{ExprError, Number};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(Number),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let position = i;
        let kind = match bytes[i] {
            b' ' => {
                i += 1;
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'0'..=b'9' | b'.' => {
                let (number, end) = lex_number(input, position)?;
                i = end;
                tokens.push(Token { kind: TokenKind::Number(number), position });
                continue;
            }
            _ => {
                let ch = input[position..].chars().next().unwrap_or('\u{fffd}');
                return Err(ExprError::DisallowedCharacter { ch, position });
            }
        };
        tokens.push(Token { kind, position });
        i += 1;
    }

    Ok(tokens)
}

/// Lex `DIGITS ('.' DIGITS?)? | '.' DIGITS` starting at `start`.
fn lex_number(input: &str, start: usize) -> Result<(Number, usize), ExprError> {
    let bytes = input.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let int_end = digits_from(start);
    let has_int = int_end > start;

    if int_end < bytes.len() && bytes[int_end] == b'.' {
        let frac_end = digits_from(int_end + 1);
        let has_frac = frac_end > int_end + 1;
        if !has_int && !has_frac {
            return Err(ExprError::InvalidNumber { position: start });
        }
        let value: f64 = input[start..frac_end]
            .parse()
            .map_err(|_| ExprError::InvalidNumber { position: start })?;
        return Ok((Number::Float(value), frac_end));
    }

    if !has_int {
        return Err(ExprError::InvalidNumber { position: start });
    }

    let text = &input[start..int_end];
    // `007` is ambiguous with octal notation; only all-zero runs like `00` pass.
    if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
        return Err(ExprError::InvalidNumber { position: start });
    }
    let number = match text.parse::<i64>() {
        Ok(i) => Number::Int(i),
        // Too wide for i64: keep going in floating point.
        Err(_) => Number::Float(
            text.parse()
                .map_err(|_| ExprError::InvalidNumber { position: start })?,
        ),
    };
    Ok((number, int_end))
}
