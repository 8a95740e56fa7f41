//! Subset construction (NFA -> DFA) and Hopcroft-style minimisation.

use std::collections::{HashMap, HashSet};

use crate::bitset::StateSet;
use crate::error::CapacityError;
use crate::limits::{MAX_NUM_DFA_STATES, NUM_CHARS};
use crate::nfa::Nfa;

/// One state of a [`Dfa`]. Exactly one transition (or none) per byte.
#[derive(Clone, Debug)]
pub struct DfaState {
    pub accept: Option<u32>,
    pub transitions: Box<[Option<usize>; NUM_CHARS]>,
}

impl DfaState {
    fn new(accept: Option<u32>) -> Self {
        DfaState {
            accept,
            transitions: Box::new([None; NUM_CHARS]),
        }
    }

    fn structurally_eq(&self, other: &DfaState) -> bool {
        self.accept == other.accept && self.transitions == other.transitions
    }
}

/// A deterministic finite automaton over the byte alphabet `0..256`, with
/// state 0 as its start state.
#[derive(Clone, Debug)]
pub struct Dfa {
    pub states: Vec<DfaState>,
}

impl Dfa {
    pub fn initial_state(&self) -> usize {
        0
    }

    /// Classifies `input`: returns the accept identifier of the winning
    /// regex if the whole string is accepted, `None` otherwise. There is
    /// no anchoring syntax in this grammar, so "accepted" always means
    /// the entire input consumed the DFA into an accepting state.
    pub fn classify(&self, input: &[u8]) -> Option<u32> {
        let mut state = self.initial_state();
        for &b in input {
            state = self.states[state].transitions[b as usize]?;
        }
        self.states[state].accept
    }

    /// Canonical Rabin-Scott subset construction: each DFA state is the
    /// epsilon-closure of a set of NFA states, reached by a worklist that
    /// explores one byte at a time.
    pub fn from_nfa(nfa: &Nfa) -> Result<Dfa, CapacityError> {
        let start_subset = nfa.closure(nfa.initial_state());

        let mut index_of: HashMap<StateSet, usize> = HashMap::new();
        let mut subsets: Vec<StateSet> = Vec::new();
        let mut worklist: Vec<usize> = Vec::new();

        index_of.insert(start_subset, 0);
        subsets.push(start_subset);
        worklist.push(0);

        let mut states: Vec<DfaState> = vec![DfaState::new(accept_of(nfa, &start_subset))];

        while let Some(q) = worklist.pop() {
            let subset = subsets[q];
            for b in 0..NUM_CHARS {
                let mut image = StateSet::empty();
                for n in subset.iter() {
                    if let Some(t) = nfa.states[n].transitions[b] {
                        image.union_with(&nfa.closure(t));
                    }
                }
                if image.is_empty() {
                    continue;
                }
                let target = if let Some(&idx) = index_of.get(&image) {
                    idx
                } else {
                    if states.len() >= MAX_NUM_DFA_STATES {
                        return Err(CapacityError::TooManyDfaStates(states.len() + 1));
                    }
                    let idx = states.len();
                    states.push(DfaState::new(accept_of(nfa, &image)));
                    index_of.insert(image, idx);
                    subsets.push(image);
                    worklist.push(idx);
                    idx
                };
                states[q].transitions[b] = Some(target);
            }
        }

        Ok(Dfa { states })
    }

    /// Removes states unreachable from the start state, then collapses
    /// every maximal set of structurally-indistinguishable states into
    /// one, via Hopcroft's partition-refinement algorithm generalised to
    /// a k-way initial partition keyed on accept identifier (plain
    /// accept/reject would wrongly merge states accepting different
    /// tokens).
    pub fn minimize(&mut self) {
        self.remove_unreachable_states();
        if self.states.is_empty() {
            return;
        }

        let partition = self.equivalence_classes();
        self.collapse_to(&partition);
    }

    fn remove_unreachable_states(&mut self) {
        let mut reachable = vec![false; self.states.len()];
        let mut worklist = vec![self.initial_state()];
        reachable[self.initial_state()] = true;
        while let Some(s) = worklist.pop() {
            for t in self.states[s].transitions.iter().flatten() {
                if !reachable[*t] {
                    reachable[*t] = true;
                    worklist.push(*t);
                }
            }
        }

        if reachable.iter().all(|&r| r) {
            return;
        }

        let mut remap = vec![usize::MAX; self.states.len()];
        let mut kept = Vec::new();
        for (old, state) in self.states.iter().enumerate() {
            if reachable[old] {
                remap[old] = kept.len();
                kept.push(state.clone());
            }
        }
        for state in &mut kept {
            for t in state.transitions.iter_mut() {
                if let Some(target) = t {
                    *t = Some(remap[*target]);
                }
            }
        }
        self.states = kept;
    }

    /// Returns, for each state, the index of the equivalence class it
    /// belongs to after partition refinement.
    fn equivalence_classes(&self) -> Vec<usize> {
        let n = self.states.len();

        // Initial partition: one class per distinct accept identifier,
        // plus one class for non-accepting states.
        let mut class_of_key: HashMap<Option<u32>, usize> = HashMap::new();
        let mut classes: Vec<Vec<usize>> = Vec::new();
        for (i, state) in self.states.iter().enumerate() {
            let class = *class_of_key.entry(state.accept).or_insert_with(|| {
                classes.push(Vec::new());
                classes.len() - 1
            });
            classes[class].push(i);
        }

        let mut class_of = vec![0usize; n];
        for (c, members) in classes.iter().enumerate() {
            for &s in members {
                class_of[s] = c;
            }
        }

        let mut worklist: Vec<usize> = (0..classes.len()).collect();

        while let Some(splitter) = worklist.pop() {
            if splitter >= classes.len() || classes[splitter].is_empty() {
                continue;
            }
            for b in 0..NUM_CHARS {
                // Preimage of `splitter` under byte `b`.
                let splitter_members: StateSet =
                    classes[splitter].iter().copied().collect();
                let preimage: Vec<usize> = (0..n)
                    .filter(|&s| match self.states[s].transitions[b] {
                        Some(t) => splitter_members.contains(t),
                        None => false,
                    })
                    .collect();
                if preimage.is_empty() {
                    continue;
                }
                let mut touched: Vec<usize> = preimage
                    .iter()
                    .map(|&s| class_of[s])
                    .collect::<HashSet<_>>()
                    .into_iter()
                    .collect();
                touched.sort_unstable();

                for c in touched {
                    let preimage_set: StateSet = preimage.iter().copied().collect();
                    let (inside, outside): (Vec<usize>, Vec<usize>) = classes[c]
                        .iter()
                        .copied()
                        .partition(|s| preimage_set.contains(*s));
                    if inside.is_empty() || outside.is_empty() {
                        continue;
                    }
                    classes[c] = inside.clone();
                    let new_class = classes.len();
                    classes.push(outside.clone());
                    for &s in &outside {
                        class_of[s] = new_class;
                    }
                    // If `c` is itself still pending as a future splitter,
                    // both halves must replace it in the worklist; pushing
                    // only the smaller one would silently drop the other.
                    if let Some(pos) = worklist.iter().position(|&w| w == c) {
                        worklist.swap_remove(pos);
                        worklist.push(c);
                        worklist.push(new_class);
                    } else if inside.len() <= outside.len() {
                        worklist.push(c);
                    } else {
                        worklist.push(new_class);
                    }
                }
            }
        }

        class_of
    }

    fn collapse_to(&mut self, class_of: &[usize]) {
        let num_classes = class_of.iter().copied().max().map_or(0, |m| m + 1);

        // Representative = lowest original state index in each class.
        let mut representative = vec![usize::MAX; num_classes];
        for (state, &class) in class_of.iter().enumerate() {
            if state < representative[class] {
                representative[class] = state;
            }
        }

        let start_class = class_of[self.initial_state()];
        let mut class_order: Vec<usize> = (0..num_classes).collect();
        class_order.swap(0, start_class);
        let mut new_index_of_class = vec![0usize; num_classes];
        for (new_idx, &class) in class_order.iter().enumerate() {
            new_index_of_class[class] = new_idx;
        }

        let mut new_states = Vec::with_capacity(num_classes);
        for &class in &class_order {
            let rep = &self.states[representative[class]];
            let mut state = DfaState::new(rep.accept);
            for b in 0..NUM_CHARS {
                state.transitions[b] = rep.transitions[b]
                    .map(|t| new_index_of_class[class_of[t]]);
            }
            new_states.push(state);
        }

        self.states = new_states;
    }
}

fn accept_of(nfa: &Nfa, subset: &StateSet) -> Option<u32> {
    subset
        .iter()
        .filter_map(|s| nfa.states[s].accept)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Nfa;
    use crate::parser;

    fn compile(regexes: &[&str]) -> Dfa {
        let asts: Vec<_> = regexes.iter().map(|r| parser::regex(r).unwrap()).collect();
        let nfa = Nfa::from_asts(&asts).unwrap();
        Dfa::from_nfa(&nfa).unwrap()
    }

    #[test]
    fn alternation_accepts_both_branches_with_same_identifier() {
        let dfa = compile(&["a|b"]);
        assert_eq!(dfa.classify(b"a"), Some(0));
        assert_eq!(dfa.classify(b"b"), Some(0));
        assert_eq!(dfa.classify(b"c"), None);
        assert_eq!(dfa.classify(b""), None);
    }

    #[test]
    fn star_accepts_the_empty_string() {
        let dfa = compile(&["a*"]);
        assert_eq!(dfa.classify(b""), Some(0));
        assert_eq!(dfa.classify(b"aaa"), Some(0));
        assert_eq!(dfa.classify(b"ab"), None);
    }

    #[test]
    fn earliest_listed_regex_wins_ties() {
        let dfa = compile(&["ab", "abc"]);
        assert_eq!(dfa.classify(b"ab"), Some(0));
        assert_eq!(dfa.classify(b"abc"), Some(1));
    }

    #[test]
    fn bracket_range() {
        let dfa = compile(&["[a-c]"]);
        for b in [b'a', b'b', b'c'] {
            assert_eq!(dfa.classify(&[b]), Some(0));
        }
        assert_eq!(dfa.classify(b"d"), None);
    }

    #[test]
    fn one_or_more_requires_at_least_one_repetition() {
        let dfa = compile(&["(ab)+"]);
        assert_eq!(dfa.classify(b"ab"), Some(0));
        assert_eq!(dfa.classify(b"abab"), Some(0));
        assert_eq!(dfa.classify(b"a"), None);
        assert_eq!(dfa.classify(b"aba"), None);
    }

    #[test]
    fn minimized_dfa_has_no_two_structurally_identical_states() {
        let mut dfa = compile(&["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"]);
        dfa.minimize();
        for i in 0..dfa.states.len() {
            for j in (i + 1)..dfa.states.len() {
                assert!(!dfa.states[i].structurally_eq(&dfa.states[j]));
            }
        }
    }

    #[test]
    fn minimize_is_idempotent() {
        let mut dfa = compile(&["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"]);
        dfa.minimize();
        let before = dfa.states.len();
        dfa.minimize();
        assert_eq!(before, dfa.states.len());
    }

    #[test]
    fn minimization_does_not_change_classification() {
        let regexes = ["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"];
        let inputs: [&[u8]; 6] = [b"int", b"char", b"999", b"ba", b"bagabhghg", b"ch"];
        let expected: [Option<u32>; 6] = [Some(0), Some(1), Some(2), Some(3), Some(3), None];

        let mut dfa = compile(&regexes);
        for (input, exp) in inputs.iter().zip(expected.iter()) {
            assert_eq!(dfa.classify(input), *exp);
        }
        dfa.minimize();
        for (input, exp) in inputs.iter().zip(expected.iter()) {
            assert_eq!(dfa.classify(input), *exp);
        }
    }

    #[test]
    fn every_state_is_reachable_from_start() {
        let mut dfa = compile(&["int", "char", "[0-9]+", "ba(g|d|[h,2])?(ab(hg)+)*"]);
        dfa.minimize();
        let mut reachable = vec![false; dfa.states.len()];
        let mut worklist = vec![dfa.initial_state()];
        reachable[dfa.initial_state()] = true;
        while let Some(s) = worklist.pop() {
            for t in dfa.states[s].transitions.iter().flatten() {
                if !reachable[*t] {
                    reachable[*t] = true;
                    worklist.push(*t);
                }
            }
        }
        assert!(reachable.iter().all(|&r| r));
    }
}
