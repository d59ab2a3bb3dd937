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

//! Scanning with a set of tables.
//!
//! All tables run in lockstep from the scan position. The winner is the
//! longest match, then the strictly higher precedence, then the rule declared
//! first. Only non-empty matches count.

use std::cmp::Reverse;
use std::fmt::{Display, Formatter};
use std::ops::Range;

use crate::table::Table;

/// A token produced by a [`Lexer`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token<'t, 's> {
    /// Name of the winning rule.
    pub kind: &'t str,
    /// The matched text.
    pub text: &'s str,
    /// The matched text again, for rules carrying `@self`.
    pub payload: Option<&'s str>,
    /// Byte offsets of the match in the input.
    pub span: Range<usize>,
}

impl<'t, 's> Display for Token<'t, 's> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}: {} {:?}", self.span.start, self.span.end, self.kind, self.text)
    }
}

/// No table accepts any non-empty prefix at `offset`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NoMatch {
    /// Byte offset where scanning failed.
    pub offset: usize,
    /// The character at that offset.
    pub found: char,
}

impl Display for NoMatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no rule matches '{}' at offset {}", self.found.escape_debug(), self.offset)
    }
}

impl std::error::Error for NoMatch {}

/// The winning `(table index, end offset)` for a scan starting at `start`.
pub fn longest_match(tables: &[Table], input: &str, start: usize) -> Option<(usize, usize)> {
    let mut cursors = tables.iter().map(|t| Some(t.entry())).collect::<Vec<_>>();
    let mut alive = cursors.len();
    let mut candidates = Vec::new();
    for (i, c) in input[start..].char_indices() {
        if alive == 0 { break; }
        let end = start + i + c.len_utf8();
        for (k, (t, cursor)) in tables.iter().zip(cursors.iter_mut()).enumerate() {
            let s = match *cursor {
                Some(s) => s,
                None => continue,
            };
            *cursor = t.next(s, c);
            match *cursor {
                Some(s) if t.is_accepting(s) => candidates.push((k, end)),
                Some(_) => (),
                None => alive -= 1,
            }
        }
    }
    candidates.into_iter()
        .max_by_key(|&(k, end)| (end, tables[k].rule().precedence(), Reverse(k)))
}

/// Lazy token stream over `input`.
///
/// A [`NoMatch`] is reported once, and scanning resumes one character later.
///
/// ```
/// # use rlex::{Rule, Attribute, compile_rules, Lexer};
/// let rules = vec![
///     Rule::new("ID", "[a-z]+").unwrap(),
///     Rule::new("WS", " +").unwrap().with_attribute(Attribute::Discard),
/// ];
/// let tables = compile_rules(&rules).unwrap();
/// let words = Lexer::new(&tables, "hello  world")
///     .map(|t| t.unwrap().text)
///     .collect::<Vec<_>>();
/// assert_eq!(words, ["hello", "world"]);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'t, 's> {
    tables: &'t [Table],
    input: &'s str,
    offset: usize,
}

impl<'t, 's> Lexer<'t, 's> {
    pub fn new(tables: &'t [Table], input: &'s str) -> Self {
        Lexer { tables, input, offset: 0 }
    }

    /// Current byte offset in the input.
    pub fn offset(&self) -> usize { self.offset }

    /// Start over from the beginning of the input.
    pub fn restart(&mut self) { self.offset = 0 }

    /// Continue scanning from `offset`.
    /// # Panics
    /// Panics if `offset` is not on a character boundary of the input.
    pub fn seek(&mut self, offset: usize) {
        assert!(self.input.is_char_boundary(offset), "offset {} is not a char boundary", offset);
        self.offset = offset
    }
}

impl<'t, 's> Iterator for Lexer<'t, 's> {
    type Item = Result<Token<'t, 's>, NoMatch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let found = self.input[self.offset..].chars().next()?;
            let (k, end) = match longest_match(self.tables, self.input, self.offset) {
                Some(m) => m,
                None => {
                    let offset = self.offset;
                    trace!(lexer, "no match at offset {}", offset);
                    self.offset += found.len_utf8();
                    return Some(Err(NoMatch { offset, found }));
                }
            };
            let rule = self.tables[k].rule();
            let span = self.offset..end;
            self.offset = end;
            if rule.is_discarded() {
                trace!(lexer, "discarded {} at {:?}", rule.name(), span);
                continue;
            }
            let text = &self.input[span.clone()];
            return Some(Ok(Token {
                kind: rule.name(),
                text,
                payload: if rule.is_self_typed() { Some(text) } else { None },
                span,
            }));
        }
    }
}

/// Scan all of `input`, stopping at the first failure.
pub fn tokenize<'t, 's>(tables: &'t [Table], input: &'s str) -> Result<Vec<Token<'t, 's>>, NoMatch> {
    Lexer::new(tables, input).collect()
}
