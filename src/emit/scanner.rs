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


// Runtime of every generated scanner. The emitter parses this file and emits
// its items after the `TABLES` static; tests include it directly.

/// Transition table of a single rule.
#[derive(Debug)]
pub struct Table {
    /// Name of the rule, used as the token kind.
    pub name: &'static str,
    /// Tie-break among longest matches, higher wins.
    pub precedence: i64,
    /// Matches are consumed but produce no token.
    pub discard: bool,
    /// Tokens carry their text as payload.
    pub self_type: bool,
    /// The start state.
    pub entry: usize,
    /// Accepting states, ascending.
    pub accepting: &'static [usize],
    /// For each state, `(character, next state)` pairs sorted by character.
    pub transitions: &'static [&'static [(char, usize)]],
}

impl Table {
    /// The state after consuming `c` in `state`, if any.
    pub fn next(&self, state: usize, c: char) -> Option<usize> {
        let row = self.transitions.get(state)?;
        row.binary_search_by_key(&c, |&(k, _)| k).ok().map(|i| row[i].1)
    }

    /// Check whether `state` is accepting.
    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting.binary_search(&state).is_ok()
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    /// Name of the winning rule.
    pub kind: &'static str,
    /// The matched text.
    pub text: &'s str,
    /// The matched text again, for `@self` rules.
    pub payload: Option<&'s str>,
    /// Byte offsets of the match.
    pub span: std::ops::Range<usize>,
}

/// No rule matches at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch {
    /// Byte offset where scanning failed.
    pub offset: usize,
    /// The character at that offset.
    pub found: char,
}

impl std::fmt::Display for NoMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no rule matches '{}' at offset {}", self.found.escape_debug(), self.offset)
    }
}

impl std::error::Error for NoMatch {}

/// The winning `(table index, end offset)` for a scan starting at `start`:
/// the longest match, then the higher precedence, then the earlier table.
fn longest_match(tables: &[Table], input: &str, start: usize) -> Option<(usize, usize)> {
    let mut cursors: Vec<Option<usize>> = tables.iter().map(|t| Some(t.entry)).collect();
    let mut alive = cursors.len();
    let mut best: Option<(usize, usize)> = None;
    for (i, c) in input[start..].char_indices() {
        if alive == 0 {
            break;
        }
        let end = start + i + c.len_utf8();
        for (k, t) in tables.iter().enumerate() {
            let s = match cursors[k] {
                Some(s) => s,
                None => continue,
            };
            cursors[k] = t.next(s, c);
            match cursors[k] {
                Some(s) if t.is_accepting(s) => {
                    let better = match best {
                        None => true,
                        Some((b, e)) => end > e || tables[b].precedence < t.precedence,
                    };
                    if better {
                        best = Some((k, end));
                    }
                }
                Some(_) => {}
                None => alive -= 1,
            }
        }
    }
    best
}

/// Lazy token stream. A `NoMatch` is reported once, and scanning resumes one
/// character later.
#[derive(Debug, Clone)]
pub struct Lexer<'s> {
    tables: &'static [Table],
    input: &'s str,
    offset: usize,
}

impl<'s> Lexer<'s> {
    /// Scan `input` from the beginning with [`TABLES`].
    pub fn new(input: &'s str) -> Self {
        Lexer::with_tables(TABLES, input)
    }

    /// Scan `input` from the beginning with other tables.
    pub fn with_tables(tables: &'static [Table], input: &'s str) -> Self {
        Lexer { tables, input, offset: 0 }
    }

    /// Current byte offset in the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Start over from the beginning of the input.
    pub fn restart(&mut self) {
        self.offset = 0
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Result<Token<'s>, NoMatch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let found = self.input[self.offset..].chars().next()?;
            let (k, end) = match longest_match(self.tables, self.input, self.offset) {
                Some(m) => m,
                None => {
                    let offset = self.offset;
                    self.offset += found.len_utf8();
                    return Some(Err(NoMatch { offset, found }));
                }
            };
            let table = &self.tables[k];
            let span = self.offset..end;
            self.offset = end;
            if table.discard {
                continue;
            }
            let text = &self.input[span.clone()];
            let payload = if table.self_type { Some(text) } else { None };
            return Some(Ok(Token { kind: table.name, text, payload, span }));
        }
    }
}
