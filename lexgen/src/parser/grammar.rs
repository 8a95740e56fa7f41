//! Recursive-descent parser building an [`Ast`] from a token stream.
//!
//! Mirrors the grammar directly:
//!
//! ```text
//! Start      := Sequence END
//! Sequence   := Component+
//! Component  := Factor ('|' Component)?
//! Factor     := Term ('?' | '*' | '+')?
//! Term       := STRING | '(' Sequence ')' | '[' List ']'
//! List       := ListComponent (',' ListComponent)*
//! ListComponent := STRING ('-' STRING)?
//! ```

use crate::ast::Ast;
use crate::error::{CapacityError, RegexCompileError, RegexSyntaxError};
use crate::limits::MAX_NUM_REGEXP_CHILDREN;
use crate::parser::lexer::{Token, TokenKind};

/// Parser context: the token stream plus the original source, threaded
/// explicitly through every recursive call instead of living in a global.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn unexpected(&self) -> RegexSyntaxError {
        RegexSyntaxError::UnexpectedToken {
            source: self.source.to_string(),
            offset: self.peek().offset,
        }
    }

    fn parse_start(&mut self) -> Result<Ast, RegexCompileError> {
        let seq = self.parse_sequence()?;
        match self.peek().kind {
            TokenKind::End => Ok(seq),
            _ => Err(self.unexpected().into()),
        }
    }

    /// `Component+`, stopping at `)`, `]`, or `END`.
    fn parse_sequence(&mut self) -> Result<Ast, RegexCompileError> {
        let mut components = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::End | TokenKind::RightPar | TokenKind::RightBracket => break,
                _ => components.push(self.parse_component()?),
            }
            if components.len() > MAX_NUM_REGEXP_CHILDREN {
                return Err(CapacityError::TooManyChildren(components.len()).into());
            }
        }
        if components.is_empty() {
            return Err(self.unexpected().into());
        }
        Ok(if components.len() == 1 {
            components.into_iter().next().unwrap()
        } else {
            Ast::Sequence(components)
        })
    }

    /// `Factor ('|' Component)?`, right-associative.
    fn parse_component(&mut self) -> Result<Ast, RegexCompileError> {
        let factor = self.parse_factor()?;
        if self.peek().kind == TokenKind::Pipe {
            self.advance();
            let rest = self.parse_component()?;
            Ok(Ast::Or(Box::new(factor), Box::new(rest)))
        } else {
            Ok(factor)
        }
    }

    /// `Term ('?' | '*' | '+')?`
    fn parse_factor(&mut self) -> Result<Ast, RegexCompileError> {
        let term = self.parse_term()?;
        let wrapped = match self.peek().kind {
            TokenKind::Question => {
                self.advance();
                Ast::Optional(Box::new(term))
            }
            TokenKind::Star => {
                self.advance();
                Ast::ZeroOrMore(Box::new(term))
            }
            TokenKind::Plus => {
                self.advance();
                Ast::OneOrMore(Box::new(term))
            }
            _ => term,
        };
        Ok(wrapped)
    }

    /// `STRING | '(' Sequence ')' | '[' List ']'`
    fn parse_term(&mut self) -> Result<Ast, RegexCompileError> {
        match &self.peek().kind {
            TokenKind::Str(_) => {
                let tok = self.advance();
                let TokenKind::Str(bytes) = tok.kind else {
                    unreachable!()
                };
                Ok(Ast::String(bytes))
            }
            TokenKind::LeftPar => {
                let open = self.advance().offset;
                let inner = self.parse_sequence()?;
                match self.peek().kind {
                    TokenKind::RightPar => {
                        self.advance();
                        Ok(inner)
                    }
                    _ => Err(RegexSyntaxError::UnterminatedGroup {
                        source: self.source.to_string(),
                        offset: open,
                    }
                    .into()),
                }
            }
            TokenKind::LeftBracket => {
                let open = self.advance().offset;
                let list = self.parse_list()?;
                match self.peek().kind {
                    TokenKind::RightBracket => {
                        self.advance();
                        Ok(Ast::OneOf(list))
                    }
                    _ => Err(RegexSyntaxError::UnterminatedClass {
                        source: self.source.to_string(),
                        offset: open,
                    }
                    .into()),
                }
            }
            TokenKind::End => Err(RegexSyntaxError::UnexpectedEnd {
                source: self.source.to_string(),
            }
            .into()),
            _ => Err(self.unexpected().into()),
        }
    }

    /// `ListComponent (',' ListComponent)*`
    fn parse_list(&mut self) -> Result<Vec<Ast>, RegexCompileError> {
        let mut components = vec![self.parse_list_component()?];
        while self.peek().kind == TokenKind::Comma {
            self.advance();
            components.push(self.parse_list_component()?);
            if components.len() > MAX_NUM_REGEXP_CHILDREN {
                return Err(CapacityError::TooManyChildren(components.len()).into());
            }
        }
        Ok(components)
    }

    /// `STRING ('-' STRING)?`
    fn parse_list_component(&mut self) -> Result<Ast, RegexCompileError> {
        let first = self.expect_single_char_string()?;
        if self.peek().kind == TokenKind::Dash {
            self.advance();
            let second = self.expect_single_char_string()?;
            if first > second {
                return Err(RegexSyntaxError::RangeReversed {
                    source: self.source.to_string(),
                    lo: first,
                    hi: second,
                }
                .into());
            }
            Ok(Ast::Range(first, second))
        } else {
            Ok(Ast::String(vec![first]))
        }
    }

    fn expect_single_char_string(&mut self) -> Result<u8, RegexCompileError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Str(bytes) if bytes.len() == 1 => {
                self.advance();
                Ok(bytes[0])
            }
            TokenKind::Str(_) => Err(RegexSyntaxError::RangeEndpointNotSingleChar {
                source: self.source.to_string(),
                offset: tok.offset,
            }
            .into()),
            _ => Err(self.unexpected().into()),
        }
    }
}

/// Tokenizes and parses `source` into an [`Ast`].
pub fn parse(source: &str) -> Result<Ast, RegexCompileError> {
    let tokens = super::lexer::tokenize(source)?;
    let mut parser = Parser { source, tokens, pos: 0 };
    parser.parse_start()
}
