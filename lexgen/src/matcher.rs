//! Backtracking reference matcher over the AST directly, used as an
//! independent oracle to cross-check compiled DFAs against in property
//! tests; deliberately not the compiled pipeline itself, and not the
//! `regex` crate, since this grammar isn't a subset of its syntax.

use crate::ast::Ast;

/// Whether `ast` matches `input` in its entirety. This grammar has no
/// anchors, but whole-string acceptance is the contract [`crate::dfa::Dfa::classify`]
/// implements too.
pub fn matches(ast: &Ast, input: &[u8]) -> bool {
    match_rest(ast, input, 0, &|pos| pos == input.len())
}

/// Continuation-passing backtracking: `cont(pos)` decides whether the
/// match can be considered successful once this node has consumed up to
/// `pos`. This lets alternation and repetition try each option without
/// committing to a particular split point up front.
fn match_rest(ast: &Ast, input: &[u8], pos: usize, cont: &dyn Fn(usize) -> bool) -> bool {
    match ast {
        Ast::String(bytes) => {
            if input[pos..].starts_with(bytes.as_slice()) {
                cont(pos + bytes.len())
            } else {
                false
            }
        }
        Ast::Sequence(children) => match_sequence(children, input, pos, cont),
        Ast::Or(l, r) => {
            match_rest(l, input, pos, cont) || match_rest(r, input, pos, cont)
        }
        Ast::Optional(inner) => {
            cont(pos) || match_rest(inner, input, pos, cont)
        }
        Ast::ZeroOrMore(inner) => match_star(inner, input, pos, cont),
        Ast::OneOrMore(inner) => match_rest(inner, input, pos, &|next| {
            next != pos && match_star(inner, input, next, cont)
        }),
        Ast::OneOf(children) => children
            .iter()
            .any(|child| match_rest(child, input, pos, cont)),
        Ast::Range(lo, hi) => {
            if pos < input.len() && (*lo..=*hi).contains(&input[pos]) {
                cont(pos + 1)
            } else {
                false
            }
        }
    }
}

fn match_sequence(children: &[Ast], input: &[u8], pos: usize, cont: &dyn Fn(usize) -> bool) -> bool {
    match children {
        [] => cont(pos),
        [first, rest @ ..] => {
            match_rest(first, input, pos, &|next| match_sequence(rest, input, next, cont))
        }
    }
}

/// Zero or more repetitions of `inner`, each repetition required to
/// advance `pos` to avoid looping forever on a nullable inner pattern.
fn match_star(inner: &Ast, input: &[u8], pos: usize, cont: &dyn Fn(usize) -> bool) -> bool {
    cont(pos)
        || match_rest(inner, input, pos, &|next| {
            next != pos && match_star(inner, input, next, cont)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn ast(src: &str) -> Ast {
        parser::regex(src).unwrap()
    }

    #[test]
    fn matches_agree_with_the_worked_scenarios() {
        assert!(matches(&ast("a|b"), b"a"));
        assert!(matches(&ast("a|b"), b"b"));
        assert!(!matches(&ast("a|b"), b"c"));
        assert!(!matches(&ast("a|b"), b""));

        assert!(matches(&ast("a*"), b""));
        assert!(matches(&ast("a*"), b"aaa"));
        assert!(!matches(&ast("a*"), b"ab"));

        assert!(matches(&ast("[a-c]"), b"a"));
        assert!(!matches(&ast("[a-c]"), b"d"));

        assert!(matches(&ast("(ab)+"), b"ab"));
        assert!(matches(&ast("(ab)+"), b"abab"));
        assert!(!matches(&ast("(ab)+"), b"a"));
        assert!(!matches(&ast("(ab)+"), b"aba"));
    }
}
