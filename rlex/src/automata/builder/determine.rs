/*
 * lexgen: table-driven lexer generator
 * Copyright (C) 2021  Xie Ruifeng
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! NFA to DFA, by subset construction.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Write;
use std::rc::Rc;

use super::{NFA, FAState};

/// A set of NFA states, the label of a DFA state.
pub type NFAStateSet = BTreeSet<FAState>;

/// A DFA state, indexing [`DFA::labels`].
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct DFAState(u32);

impl DFAState {
    /// The dead state: target of every undefined transition, and a trap.
    /// Never allocated, so never confused with a real state.
    pub const DEAD: DFAState = DFAState(u32::MAX);

    /// Index into the state list.
    pub fn index(self) -> usize { self.0 as usize }

    pub fn is_dead(self) -> bool { self == Self::DEAD }
}

/// A DFA from subset construction (not minimized).
#[derive(Debug, Clone)]
pub struct DFA {
    labels: Vec<Rc<NFAStateSet>>,
    transitions: BTreeMap<(DFAState, char), DFAState>,
    accepting: BTreeSet<DFAState>,
}

impl DFA {
    /// The entry state: the epsilon-closure of the NFA start.
    pub const ENTRY: DFAState = DFAState(0);

    pub fn entry(&self) -> DFAState { Self::ENTRY }

    pub fn state_count(&self) -> usize { self.labels.len() }

    /// The NFA states a DFA state stands for.
    pub fn label(&self, s: DFAState) -> &NFAStateSet { &self.labels[s.index()] }

    pub fn accepting(&self) -> &BTreeSet<DFAState> { &self.accepting }

    pub fn is_accepting(&self, s: DFAState) -> bool { self.accepting.contains(&s) }

    /// Total transition function: undefined pairs go to [`DFAState::DEAD`].
    pub fn next(&self, s: DFAState, a: char) -> DFAState {
        self.transitions.get(&(s, a)).copied().unwrap_or(DFAState::DEAD)
    }

    /// Defined transitions, ordered by departure then input.
    pub fn transitions(&self) -> impl Iterator<Item=(DFAState, char, DFAState)> + '_ {
        self.transitions.iter().map(|(&(s, a), &t)| (s, a, t))
    }

    /// Check whether the whole `input` is accepted.
    pub fn accepts(&self, input: &str) -> bool {
        let mut s = self.entry();
        for c in input.chars() {
            s = self.next(s, c);
            if s.is_dead() { return false; }
        }
        self.is_accepting(s)
    }

    /// Graphviz rendering, for diagnostics.
    pub fn debug_format(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        writeln!(buffer, r#"digraph {{"#)?;
        writeln!(buffer, r#"  rankdir="LR";"#)?;
        for ((s, a), t) in &self.transitions {
            writeln!(buffer, r#"  {} -> {} [label="{}"];"#, s.0, t.0, a.escape_debug())?;
        }
        writeln!(buffer, r#"  start [shape="plaintext"];"#)?;
        writeln!(buffer, r#"  start -> {};"#, Self::ENTRY.0)?;
        for f in &self.accepting {
            writeln!(buffer, r#"  {} [shape="doublecircle"];"#, f.0)?;
        }
        writeln!(buffer, r#"}}"#)?;
        Ok(buffer)
    }
}

#[derive(Default)]
struct StateCollector {
    states: BTreeMap<Rc<NFAStateSet>, DFAState>,
    labels: Vec<Rc<NFAStateSet>>,
    states_to_process: VecDeque<DFAState>,
}

impl StateCollector {
    /// Same NFA state set, same DFA state.
    fn add_or_get_state_set(&mut self, s: NFAStateSet) -> DFAState {
        if let Some(&n) = self.states.get(&s) {
            return n;
        }
        let n = DFAState(self.labels.len() as u32);
        let s = Rc::new(s);
        self.states.insert(s.clone(), n);
        self.labels.push(s);
        self.states_to_process.push_back(n);
        n
    }
}

struct Determiner<'a> {
    nfa: &'a NFA,
}

impl<'a> Determiner<'a> {
    fn epsilon_closure(&self, s: impl IntoIterator<Item=FAState>) -> NFAStateSet {
        let mut to_insert = s.into_iter().collect::<VecDeque<FAState>>();
        let mut res = NFAStateSet::new();
        while let Some(x) = to_insert.pop_front() {
            if res.insert(x) {
                for &y in &self.nfa.arcs(x).epsilon {
                    to_insert.push_front(y);
                }
            }
        }
        res
    }

    /// Destinations from `s`, per character on any outgoing arc.
    fn moves(&self, s: &NFAStateSet) -> BTreeMap<char, NFAStateSet> {
        let mut res = BTreeMap::<char, NFAStateSet>::new();
        for &x in s {
            for (&a, ts) in &self.nfa.arcs(x).on {
                res.entry(a).or_default().extend(ts.iter().copied());
            }
        }
        res
    }

    fn determine(&self) -> DFA {
        let mut transitions = BTreeMap::new();
        let mut states = StateCollector::default();
        let start = self.epsilon_closure(std::iter::once(self.nfa.start()));
        let _ = states.add_or_get_state_set(start);
        while let Some(ns) = states.states_to_process.pop_front() {
            let s = states.labels[ns.index()].clone();
            for (a, ts) in self.moves(&s) {
                let nt = states.add_or_get_state_set(self.epsilon_closure(ts));
                transitions.insert((ns, a), nt);
            }
        }
        let accepted = self.nfa.accepted();
        let accepting = states.labels.iter()
            .enumerate()
            .filter(|(_, s)| s.contains(&accepted))
            .map(|(n, _)| DFAState(n as u32))
            .collect();
        trace!(dfa, "determined {} NFA states into {} DFA states",
               self.nfa.states().len(), states.labels.len());
        DFA { labels: states.labels, transitions, accepting }
    }
}

impl NFA {
    /// Subset construction, consuming the NFA.
    pub fn determine(self) -> DFA {
        Determiner { nfa: &self }.determine()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::syntax::parse;
    use crate::automata::builder;
    use crate::utils::setup_logger;

    fn dfa(pattern: &str) -> DFA {
        builder::build(parse(pattern).unwrap()).determine()
    }

    #[test]
    fn test_determine() {
        setup_logger();
        let n = dfa("a(b|c)*");
        assert_eq!(
            n.debug_format().unwrap(),
            indoc!(r#"
                digraph {
                  rankdir="LR";
                  0 -> 1 [label="a"];
                  1 -> 2 [label="b"];
                  1 -> 3 [label="c"];
                  2 -> 2 [label="b"];
                  2 -> 3 [label="c"];
                  3 -> 2 [label="b"];
                  3 -> 3 [label="c"];
                  start [shape="plaintext"];
                  start -> 0;
                  1 [shape="doublecircle"];
                  2 [shape="doublecircle"];
                  3 [shape="doublecircle"];
                }
            "#));
        for s in &["a", "abc", "acbbc"] { assert!(n.accepts(s), "should accept {:?}", s) }
        for s in &["", "ba", "abd"] { assert!(!n.accepts(s), "should reject {:?}", s) }
    }

    #[test]
    fn test_accepting_iff_label_contains_accept() {
        for pattern in &["a(b|c)*", "(ab|a)*b?", "[0-9]+", "x?y?z?"] {
            let m = builder::build(parse(pattern).unwrap());
            let accepted = m.accepted();
            let n = m.determine();
            for i in 0..n.state_count() {
                let s = DFAState(i as u32);
                assert_eq!(n.is_accepting(s), n.label(s).contains(&accepted), "{}", pattern);
            }
        }
    }

    #[test]
    fn test_deduplication_and_dead_state() {
        let n = dfa("(a|a)(a|a)");
        assert_eq!(n.state_count(), 3);
        assert_eq!(n.next(n.entry(), 'b'), DFAState::DEAD);
        assert_eq!(n.next(DFAState::DEAD, 'a'), DFAState::DEAD);
        let labels = (0..n.state_count())
            .map(|i| n.label(DFAState(i as u32)).clone())
            .collect::<BTreeSet<_>>();
        assert_eq!(labels.len(), n.state_count());
    }

    #[test]
    fn test_determinism() {
        let n = dfa("(a|ab)(c|bcd)");
        let mut seen = BTreeSet::new();
        for (s, a, _) in n.transitions() {
            assert!(seen.insert((s, a)));
        }
        assert!(n.accepts("abcd") && n.accepts("abc") && n.accepts("ac"));
        assert!(!n.accepts("ab") && !n.accepts("abcdx"));
    }
}
