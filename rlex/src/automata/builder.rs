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

//! Regex to NFA, one construction rule per operator.

pub mod determine;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::ast::{RegEx, RegOp, CharClass};

/// An NFA state, indexing [`NFA::states`].
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct FAState(u32);

impl FAState {
    /// Index into the state list.
    pub fn index(self) -> usize { self.0 as usize }
}

/// Arcs leaving a single NFA state.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Arcs {
    /// States reachable without consuming input.
    pub epsilon: BTreeSet<FAState>,
    /// States reachable by consuming a character, possibly more than one per character.
    pub on: BTreeMap<char, BTreeSet<FAState>>,
}

/// A sub-automaton with a single entry and a single exit.
#[derive(Debug, Copy, Clone)]
pub struct Fragment {
    start: FAState,
    accepted: FAState,
}

/// A complete NFA, with exactly one start state and one accept state.
#[derive(Debug, Clone)]
pub struct NFA {
    states: Vec<Arcs>,
    start: FAState,
    accepted: FAState,
}

impl NFA {
    /// All states; a state's index is its [`FAState`].
    pub fn states(&self) -> &[Arcs] { &self.states }

    /// Arcs leaving `s`.
    pub fn arcs(&self, s: FAState) -> &Arcs { &self.states[s.index()] }

    pub fn start(&self) -> FAState { self.start }

    pub fn accepted(&self) -> FAState { self.accepted }

    /// Graphviz rendering, for diagnostics.
    pub fn debug_format(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        writeln!(buffer, r#"digraph {{"#)?;
        writeln!(buffer, r#"  rankdir="LR";"#)?;
        for (s, arcs) in self.states.iter().enumerate() {
            for t in &arcs.epsilon {
                writeln!(buffer, r#"  {} -> {} [label="ε"];"#, s, t.0)?;
            }
            for (a, ts) in &arcs.on {
                for t in ts {
                    writeln!(buffer, r#"  {} -> {} [label="{}"];"#, s, t.0, a.escape_debug())?;
                }
            }
        }
        writeln!(buffer, r#"  start [shape="plaintext"];"#)?;
        writeln!(buffer, r#"  start -> {};"#, self.start.0)?;
        writeln!(buffer, r#"  {} [shape="doublecircle"];"#, self.accepted.0)?;
        writeln!(buffer, r#"}}"#)?;
        Ok(buffer)
    }
}

/// NFA builder. Fragments built from the same builder share its state space.
#[derive(Debug, Default)]
pub struct Builder {
    states: Vec<Arcs>,
}

impl Builder {
    pub fn new() -> Self { Self::default() }

    fn state(&mut self) -> FAState {
        let res = FAState(self.states.len() as u32);
        self.states.push(Arcs::default());
        res
    }

    fn new_epsilon(&mut self, s: FAState, t: FAState) {
        let inserted = self.states[s.index()].epsilon.insert(t);
        debug_assert!(inserted, "transition ε({:?} -> {:?}) already exists.", s, t)
    }

    fn new_arc(&mut self, s: FAState, t: FAState, a: char) {
        self.states[s.index()].on.entry(a).or_default().insert(t);
    }

    fn new_fragment(&mut self, f: impl FnOnce(&mut Builder, FAState, FAState)) -> Fragment {
        let s = self.state();
        let t = self.state();
        f(self, s, t);
        Fragment { start: s, accepted: t }
    }

    pub fn literal(&mut self, c: char) -> Fragment {
        self.new_fragment(|this, s, t| this.new_arc(s, t, c))
    }

    /// One arc per member character.
    pub fn class(&mut self, cls: &CharClass) -> Fragment {
        self.new_fragment(|this, s, t| for c in cls.chars() {
            this.new_arc(s, t, c)
        })
    }

    pub fn concat(&mut self, l: Fragment, r: Fragment) -> Fragment {
        self.new_epsilon(l.accepted, r.start);
        Fragment { start: l.start, accepted: r.accepted }
    }

    pub fn union(&mut self, l: Fragment, r: Fragment) -> Fragment {
        self.new_fragment(|this, s, t| for m in [l, r].iter() {
            this.new_epsilon(s, m.start);
            this.new_epsilon(m.accepted, t);
        })
    }

    pub fn star(&mut self, m: Fragment) -> Fragment {
        self.new_fragment(|this, s, t| {
            this.new_epsilon(s, m.start);
            this.new_epsilon(s, t);
            this.new_epsilon(m.accepted, m.start);
            this.new_epsilon(m.accepted, t);
        })
    }

    /// Like [`Builder::star`], but without the bypass: one traversal is mandatory.
    pub fn plus(&mut self, m: Fragment) -> Fragment {
        self.new_fragment(|this, s, t| {
            this.new_epsilon(s, m.start);
            this.new_epsilon(m.accepted, m.start);
            this.new_epsilon(m.accepted, t);
        })
    }

    pub fn optional(&mut self, m: Fragment) -> Fragment {
        self.new_fragment(|this, s, t| {
            this.new_epsilon(s, m.start);
            this.new_epsilon(s, t);
            this.new_epsilon(m.accepted, t);
        })
    }

    /// Build fragments bottom-up, consuming the syntax tree.
    pub fn fragment(&mut self, regex: RegEx) -> Fragment {
        regex.fold(&mut |op| match op {
            RegOp::Literal(c) => self.literal(c),
            RegOp::Class(cls) => self.class(&cls),
            RegOp::Concat(l, r) => self.concat(l, r),
            RegOp::Union(l, r) => self.union(l, r),
            RegOp::Star(m) => self.star(m),
            RegOp::Plus(m) => self.plus(m),
            RegOp::Optional(m) => self.optional(m),
            RegOp::Group(m) => m,
        })
    }

    /// Close the builder with `m` as the whole automaton.
    pub fn finish(self, m: Fragment) -> NFA {
        trace!(nfa, "built NFA with {} states, start = {:?}, accepted = {:?}",
               self.states.len(), m.start, m.accepted);
        NFA { states: self.states, start: m.start, accepted: m.accepted }
    }
}

/// Compile a regex into an NFA.
pub fn build(regex: RegEx) -> NFA {
    let mut builder = Builder::new();
    let m = builder.fragment(regex);
    builder.finish(m)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::syntax::parse;

    fn nfa(pattern: &str) -> NFA {
        build(parse(pattern).unwrap())
    }

    /// Direct NFA simulation, independent of the subset construction.
    fn simulate(m: &NFA, input: &str) -> bool {
        fn close(m: &NFA, mut xs: BTreeSet<FAState>) -> BTreeSet<FAState> {
            let mut todo = xs.iter().copied().collect::<Vec<_>>();
            while let Some(x) = todo.pop() {
                for &y in &m.arcs(x).epsilon {
                    if xs.insert(y) { todo.push(y) }
                }
            }
            xs
        }
        let mut current = close(m, std::iter::once(m.start()).collect());
        for c in input.chars() {
            let next = current.iter()
                .flat_map(|&x| m.arcs(x).on.get(&c).into_iter().flatten().copied())
                .collect();
            current = close(m, next);
        }
        current.contains(&m.accepted())
    }

    #[test]
    fn test_literal_and_class() {
        let m = nfa("a");
        assert_eq!(m.states().len(), 2);
        assert_eq!(m.arcs(m.start()).on.get(&'a').map(|s| s.len()), Some(1));
        let m = nfa("[a-c]");
        assert_eq!(m.states().len(), 2);
        assert_eq!(m.arcs(m.start()).on.keys().collect::<String>(), "abc");
    }

    #[test]
    fn test_nfa_builder() {
        let m = nfa("a(b|c)*");
        assert_eq!(
            m.debug_format().unwrap(),
            indoc!(r#"
                digraph {
                  rankdir="LR";
                  0 -> 1 [label="a"];
                  1 -> 8 [label="ε"];
                  2 -> 3 [label="b"];
                  3 -> 7 [label="ε"];
                  4 -> 5 [label="c"];
                  5 -> 7 [label="ε"];
                  6 -> 2 [label="ε"];
                  6 -> 4 [label="ε"];
                  7 -> 6 [label="ε"];
                  7 -> 9 [label="ε"];
                  8 -> 6 [label="ε"];
                  8 -> 9 [label="ε"];
                  start [shape="plaintext"];
                  start -> 0;
                  9 [shape="doublecircle"];
                }
            "#));
    }

    #[test]
    fn test_nfa_semantics() {
        let cases: &[(&str, &[&str], &[&str])] = &[
            ("a(b|c)*", &["a", "abc", "acbbc"], &["", "ba", "ad"]),
            ("ab+", &["ab", "abbb"], &["a", "abab"]),
            ("ab?c", &["ac", "abc"], &["abbc", "ab"]),
            ("(ab)*", &["", "ab", "abab"], &["a", "aba"]),
            ("(a*)*b", &["b", "aab"], &["", "aa"]),
        ];
        for &(pattern, accepted, rejected) in cases {
            let m = nfa(pattern);
            for s in accepted { assert!(simulate(&m, s), "{} should accept {:?}", pattern, s) }
            for s in rejected { assert!(!simulate(&m, s), "{} should reject {:?}", pattern, s) }
        }
    }
}
