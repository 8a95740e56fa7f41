//! # lexgen
//!
//! `lexgen` compiles an ordered list of regular expressions into a single
//! deterministic finite automaton that classifies input strings into
//! tokens, returning the identifier of the earliest-listed regex that
//! matches.
//!
//! ## Usage
//!
//! ```rust
//! use lexgen::driver::compile;
//!
//! let dfa = compile(&["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"]).unwrap();
//! assert_eq!(dfa.classify(b"int"), Some(0));
//! assert_eq!(dfa.classify(b"char"), Some(1));
//! assert_eq!(dfa.classify(b"999"), Some(2));
//! assert_eq!(dfa.classify(b"ba"), Some(3));
//! assert_eq!(dfa.classify(b"ch"), None);
//! ```
//!
//! ## Regex syntax
//!
//! See [`parser`] for the full grammar. In short: `( ) * + , - ? [ ] |`
//! are operators, backslash-escape one to get it literally, `[a,b,c-d]`
//! is a character class of literals and ranges, and there is no anchoring
//! syntax: a regex matches a string iff it matches it in its entirety.
//!
//! ## Pipeline
//!
//! * [`parser`] tokenizes and parses a regex source string into an [`ast::Ast`].
//! * [`nfa`] compiles a list of ASTs into one combined [`nfa::Nfa`] via Thompson's construction.
//! * [`dfa`] runs subset construction and minimisation to produce a [`dfa::Dfa`].
//! * [`driver`] wires the three together into a single `compile` call.
//!
//! Capacity limits (regex length, token count, AST fan-out, NFA/DFA state
//! counts) live in [`limits`] and are enforced, not just documented;
//! violating one returns a [`error::CapacityError`] rather than panicking.

pub mod ast;
pub mod bitset;
pub mod dfa;
pub mod driver;
pub mod error;
pub mod limits;
pub mod nfa;
pub mod parser;

#[cfg(test)]
mod matcher;
