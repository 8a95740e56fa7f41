//! Thin orchestration: regex strings -> parsed ASTs -> combined NFA -> DFA.

use crate::dfa::Dfa;
use crate::error::{LexError, RegexCompileError};
use crate::nfa::Nfa;

/// Compiles an ordered list of regex source strings into a minimised DFA.
/// The winning token identifier for an accepted string is the position of
/// its regex in `regexes`. Fails on the first regex that doesn't parse, or
/// if the combined automaton exceeds a capacity limit.
pub fn compile(regexes: &[&str]) -> Result<Dfa, LexError> {
    let mut asts = Vec::with_capacity(regexes.len());
    for (index, source) in regexes.iter().enumerate() {
        let ast = crate::parser::regex(source).map_err(|e| match e {
            RegexCompileError::Syntax(source_err) => LexError::Syntax {
                index,
                source_text: (*source).to_string(),
                source: source_err,
            },
            RegexCompileError::Capacity(source_err) => LexError::Capacity {
                index,
                source_text: (*source).to_string(),
                source: source_err,
            },
        })?;
        asts.push(ast);
    }

    let nfa = Nfa::from_asts(&asts).map_err(LexError::Combined)?;
    let mut dfa = Dfa::from_nfa(&nfa).map_err(LexError::Combined)?;
    dfa.minimize();
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_scenario_from_the_lexer_brief() {
        let regexes = ["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"];
        let dfa = compile(&regexes).unwrap();
        assert_eq!(dfa.classify(b"int"), Some(0));
        assert_eq!(dfa.classify(b"char"), Some(1));
        assert_eq!(dfa.classify(b"999"), Some(2));
        assert_eq!(dfa.classify(b"ba"), Some(3));
        assert_eq!(dfa.classify(b"bagabhghg"), Some(3));
        assert_eq!(dfa.classify(b"ch"), None);
    }

    #[test]
    fn reports_which_regex_in_the_list_failed_to_parse() {
        let err = compile(&["int", "(unterminated"]).unwrap_err();
        match err {
            LexError::Syntax { index, .. } => assert_eq!(index, 1),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }
}
