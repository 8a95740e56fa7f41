//! Single-pass tokenizer for regex source strings.

use crate::error::CapacityError;
use crate::limits::{MAX_REGEXP_STRING_LENGTH, MAX_REGEXP_TOKENS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    LeftPar,
    RightPar,
    Star,
    Plus,
    Comma,
    Dash,
    Question,
    LeftBracket,
    RightBracket,
    Pipe,
    /// A maximal run of non-operator (or escaped) bytes.
    Str(Vec<u8>),
    End,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token's first byte in the source string.
    pub offset: usize,
}

fn is_operator_char(b: u8) -> bool {
    matches!(b, b'(' | b')' | b'*' | b'+' | b',' | b'-' | b'?' | b'[' | b']' | b'|')
}

/// Tokenizes `source` into an operator/string token stream terminated by
/// [`TokenKind::End`]. A run of non-operator bytes (including bytes
/// immediately following a backslash escape) accumulates into one
/// [`TokenKind::Str`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CapacityError> {
    if source.len() > MAX_REGEXP_STRING_LENGTH {
        return Err(CapacityError::RegexTooLong(source.len()));
    }

    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut buf: Vec<u8> = Vec::new();
    let mut buf_start = 0;

    macro_rules! flush_string {
        () => {
            if !buf.is_empty() {
                tokens.push(Token {
                    kind: TokenKind::Str(std::mem::take(&mut buf)),
                    offset: buf_start,
                });
            }
        };
    }

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' && i + 1 < bytes.len() {
            if buf.is_empty() {
                buf_start = i;
            }
            buf.push(bytes[i + 1]);
            i += 2;
            continue;
        }
        if is_operator_char(b) {
            flush_string!();
            let kind = match b {
                b'(' => TokenKind::LeftPar,
                b')' => TokenKind::RightPar,
                b'*' => TokenKind::Star,
                b'+' => TokenKind::Plus,
                b',' => TokenKind::Comma,
                b'-' => TokenKind::Dash,
                b'?' => TokenKind::Question,
                b'[' => TokenKind::LeftBracket,
                b']' => TokenKind::RightBracket,
                b'|' => TokenKind::Pipe,
                _ => unreachable!(),
            };
            tokens.push(Token { kind, offset: i });
            i += 1;
            continue;
        }
        if buf.is_empty() {
            buf_start = i;
        }
        buf.push(b);
        i += 1;
    }
    flush_string!();
    tokens.push(Token {
        kind: TokenKind::End,
        offset: bytes.len(),
    });

    if tokens.len() > MAX_REGEXP_TOKENS {
        return Err(CapacityError::TooManyTokens(tokens.len()));
    }

    Ok(tokens)
}
