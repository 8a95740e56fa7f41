//! Thompson's construction: regex AST -> NFA with epsilon transitions.

use crate::ast::Ast;
use crate::bitset::StateSet;
use crate::error::CapacityError;
use crate::limits::{MAX_NUM_NFA_STATES, NUM_CHARS};

/// One state of an [`Nfa`]. Transitions are dense: every one of the 256
/// input bytes maps either to a destination state or to nothing, which
/// makes subset construction a matter of unioning image sets rather than
/// walking a sparse adjacency list.
#[derive(Clone, Debug)]
pub struct NfaState {
    /// `Some(id)` iff this is an accepting state for regex `id`.
    pub accept: Option<u32>,
    pub transitions: Box<[Option<usize>; NUM_CHARS]>,
    pub epsilon_transitions: StateSet,
}

impl NfaState {
    fn new() -> Self {
        NfaState {
            accept: None,
            transitions: Box::new([None; NUM_CHARS]),
            epsilon_transitions: StateSet::empty(),
        }
    }
}

/// A nondeterministic finite automaton over the byte alphabet `0..256`,
/// with state 0 as its start state.
#[derive(Clone, Debug)]
pub struct Nfa {
    pub states: Vec<NfaState>,
}

/// Start and end state of one compiled sub-expression.
#[derive(Clone, Copy, Debug)]
struct Fragment {
    start: usize,
    end: usize,
}

impl Nfa {
    fn empty() -> Self {
        Nfa { states: Vec::new() }
    }

    fn add_state(&mut self) -> Result<usize, CapacityError> {
        if self.states.len() >= MAX_NUM_NFA_STATES {
            return Err(CapacityError::TooManyNfaStates(self.states.len() + 1));
        }
        self.states.push(NfaState::new());
        Ok(self.states.len() - 1)
    }

    fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon_transitions.insert(to);
    }

    /// Recursively compiles one AST node, returning its start and end
    /// state. Construction rules follow Thompson's construction exactly,
    /// one case per [`Ast`] variant.
    fn convert(&mut self, ast: &Ast) -> Result<Fragment, CapacityError> {
        match ast {
            Ast::String(bytes) => {
                debug_assert!(!bytes.is_empty());
                let mut start = self.add_state()?;
                let first = start;
                for &b in bytes {
                    let next = self.add_state()?;
                    self.states[start].transitions[b as usize] = Some(next);
                    start = next;
                }
                Ok(Fragment { start: first, end: start })
            }
            Ast::Sequence(children) => {
                debug_assert!(!children.is_empty());
                let mut iter = children.iter();
                let first = self.convert(iter.next().unwrap())?;
                let mut end = first.end;
                for child in iter {
                    let frag = self.convert(child)?;
                    self.add_epsilon(end, frag.start);
                    end = frag.end;
                }
                Ok(Fragment { start: first.start, end })
            }
            Ast::Or(l, r) => {
                let l = self.convert(l)?;
                let r = self.convert(r)?;
                let start = self.add_state()?;
                let end = self.add_state()?;
                self.add_epsilon(start, l.start);
                self.add_epsilon(start, r.start);
                self.add_epsilon(l.end, end);
                self.add_epsilon(r.end, end);
                Ok(Fragment { start, end })
            }
            Ast::Optional(inner) => {
                let x = self.convert(inner)?;
                let start = self.add_state()?;
                let end = self.add_state()?;
                self.add_epsilon(start, end);
                self.add_epsilon(start, x.start);
                self.add_epsilon(x.end, end);
                Ok(Fragment { start, end })
            }
            Ast::ZeroOrMore(inner) => {
                let x = self.convert(inner)?;
                let start = self.add_state()?;
                let end = self.add_state()?;
                self.add_epsilon(start, end);
                self.add_epsilon(start, x.start);
                self.add_epsilon(x.end, end);
                self.add_epsilon(x.end, x.start);
                Ok(Fragment { start, end })
            }
            Ast::OneOrMore(inner) => {
                let x = self.convert(inner)?;
                let start = self.add_state()?;
                let end = self.add_state()?;
                self.add_epsilon(start, x.start);
                self.add_epsilon(x.end, end);
                self.add_epsilon(x.end, x.start);
                Ok(Fragment { start, end })
            }
            Ast::OneOf(children) => {
                debug_assert!(!children.is_empty());
                let start = self.add_state()?;
                let end = self.add_state()?;
                for child in children {
                    let frag = self.convert(child)?;
                    self.add_epsilon(start, frag.start);
                    self.add_epsilon(frag.end, end);
                }
                Ok(Fragment { start, end })
            }
            Ast::Range(lo, hi) => {
                debug_assert!(lo <= hi);
                let start = self.add_state()?;
                let end = self.add_state()?;
                for b in *lo..=*hi {
                    self.states[start].transitions[b as usize] = Some(end);
                }
                Ok(Fragment { start, end })
            }
        }
    }

    /// Builds the combined NFA for an ordered list of regex ASTs: one
    /// shared branching start state, and one entry/accept pair per regex
    /// whose accept identifier is the regex's position in `asts`.
    pub fn from_asts(asts: &[Ast]) -> Result<Nfa, CapacityError> {
        let mut nfa = Nfa::empty();
        let shared_start = nfa.add_state()?;
        debug_assert_eq!(shared_start, 0);

        for (i, ast) in asts.iter().enumerate() {
            let entry = nfa.add_state()?;
            nfa.add_epsilon(shared_start, entry);
            let frag = nfa.convert(ast)?;
            nfa.add_epsilon(entry, frag.start);
            let accept = nfa.add_state()?;
            nfa.states[accept].accept = Some(i as u32);
            nfa.add_epsilon(frag.end, accept);
        }

        Ok(nfa)
    }

    /// The set of states reachable from `start` via zero or more
    /// epsilon transitions, `start` itself included.
    pub fn closure(&self, start: usize) -> StateSet {
        let mut closure = StateSet::singleton(start);
        let mut worklist = vec![start];
        while let Some(state) = worklist.pop() {
            for target in self.states[state].epsilon_transitions.iter() {
                if !closure.contains(target) {
                    closure.insert(target);
                    worklist.push(target);
                }
            }
        }
        closure
    }

    pub fn initial_state(&self) -> usize {
        0
    }
}
