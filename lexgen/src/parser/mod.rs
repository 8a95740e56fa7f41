//! Regex surface syntax: tokenizer plus recursive-descent parser.
//!
//! There are nine operator characters: `(`, `)`, `*`, `+`, `,`, `-`, `?`,
//! `[`, `]` and `|`. Any byte distinct from them stands for itself; to
//! denote one of the operators literally, escape it with a backslash `\`.
//! Concatenation is implicit (write characters next to one another).
//!
//! - `(ab)+c` accepts strings starting with "ab" repeated one or more
//!   times, followed by "c".
//! - `[0-9]+` accepts one or more decimal digits.
//! - `ba(g|d|[h,2])?` accepts "ba", optionally followed by "g", "d", "h" or
//!   "2".

mod grammar;
mod lexer;

use crate::ast::Ast;
use crate::error::RegexCompileError;

/// Tokenizes and parses a regex source string into an [`Ast`].
pub fn regex(source: &str) -> Result<Ast, RegexCompileError> {
    grammar::parse(source)
}
