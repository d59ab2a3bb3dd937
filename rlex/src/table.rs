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

//! Dense transition tables, the output of the compiler core.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::automata::DFA;
use crate::rule::Rule;

/// Transition table for a single rule.
///
/// States are plain indices. A missing entry in a row means "no transition",
/// which is distinct from a transition into state `0`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Table {
    transitions: Vec<BTreeMap<char, usize>>,
    entry: usize,
    accepting: BTreeSet<usize>,
    rule: Rule,
}

impl Table {
    /// Flatten `dfa`, attaching a copy of `rule`.
    pub fn compile(dfa: DFA, rule: &Rule) -> Table {
        let mut transitions = vec![BTreeMap::new(); dfa.state_count()];
        for (s, a, t) in dfa.transitions() {
            transitions[s.index()].insert(a, t.index());
        }
        let table = Table {
            transitions,
            entry: dfa.entry().index(),
            accepting: dfa.accepting().iter().map(|s| s.index()).collect(),
            rule: rule.clone(),
        };
        trace!(table, "{}", table);
        table
    }

    /// The state after consuming `c` in `state`, if any.
    pub fn next(&self, state: usize, c: char) -> Option<usize> {
        self.transitions.get(state)?.get(&c).copied()
    }

    pub fn is_accepting(&self, state: usize) -> bool { self.accepting.contains(&state) }

    pub fn entry(&self) -> usize { self.entry }

    pub fn accepting(&self) -> &BTreeSet<usize> { &self.accepting }

    /// The rule this table was compiled from.
    pub fn rule(&self) -> &Rule { &self.rule }

    pub fn state_count(&self) -> usize { self.transitions.len() }

    /// Outgoing transitions of `state`, ordered by character.
    pub fn row(&self, state: usize) -> &BTreeMap<char, usize> { &self.transitions[state] }

    /// Check whether the whole `text` is a match.
    ///
    /// ```
    /// # use rlex::{Rule, compile_rule};
    /// let t = compile_rule(&Rule::new("ID", "[a-z][a-z0-9]*").unwrap()).unwrap();
    /// assert!(t.matches("a1") && !t.matches("1a"));
    /// ```
    pub fn matches(&self, text: &str) -> bool {
        let mut state = self.entry;
        for c in text.chars() {
            match self.next(state, c) {
                Some(s) => state = s,
                None => return false,
            }
        }
        self.is_accepting(state)
    }
}

/// One line; the alternate form `{:#}` also lists every row.
impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "table with entry = {}, accepting = {{{}}} for '{}'",
               self.entry, self.accepting.iter().format(", "), self.rule)?;
        if f.alternate() {
            for (s, row) in self.transitions.iter().enumerate() {
                write!(f, "\n  {}: {}", s, row.iter()
                    .format_with(", ", |(a, t), f| f(&format_args!("{:?} -> {}", a, t))))?;
            }
        }
        Ok(())
    }
}
