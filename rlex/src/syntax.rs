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

//! Regex syntax: pattern text to [`RegEx`].
//!
//! ```text
//! alt    -> concat { '|' concat }
//! concat -> repeat { repeat }
//! repeat -> atom { '*' | '+' | '?' }
//! atom   -> char | '\' escape | '.' | '[' class ']' | '(' alt ')'
//! class  -> [ '^' ] member { member }
//! member -> char [ '-' char ]
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use crate::ast::{RegEx, CharClass, CharRange};
use crate::error::{Error, Result};

/// Parse a pattern into its abstract syntax tree.
///
/// ```
/// # use rlex::syntax::parse;
/// assert_eq!(parse("a(b|c)*").unwrap().to_string(), "a(b|c)*");
/// assert!(parse("(a").is_err());
/// ```
pub fn parse(pattern: &str) -> Result<RegEx> {
    let mut parser = Parser::new(pattern);
    let res = parser.alt()?;
    match parser.next() {
        None => {
            trace!(parser, "{:?} parsed as {}", pattern, res);
            Ok(res)
        }
        Some((offset, found)) => Err(Error::UnknownConstruct { found, offset }),
    }
}

/// Groups and stacked postfix operators nest at most this deep.
pub const MAX_NESTING: usize = 128;

fn end_of_input<T>(expected: &str) -> Result<T> {
    Err(Error::UnexpectedEndOfInput(expected.to_string()))
}

enum Escaped {
    Char(char),
    Class(CharClass),
}

/// Join `first` and `rest` in order, into a tree of logarithmic depth.
fn balance(first: RegEx, mut rest: Vec<RegEx>, join: fn(RegEx, RegEx) -> RegEx) -> RegEx {
    if rest.is_empty() {
        return first;
    }
    let mut right = rest.split_off(rest.len() / 2);
    let right_first = right.remove(0);
    join(balance(first, rest, join), balance(right_first, right, join))
}

struct Parser<'a> {
    input: Peekable<CharIndices<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        Parser { input: pattern.char_indices().peekable(), depth: 0 }
    }

    fn peek(&mut self) -> Option<char> {
        self.input.peek().map(|&(_, c)| c)
    }

    fn next(&mut self) -> Option<(usize, char)> {
        self.input.next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char, expected: &str) -> Result<()> {
        match self.next() {
            Some((_, x)) if x == c => Ok(()),
            Some((offset, found)) => Err(Error::UnknownConstruct { found, offset }),
            None => end_of_input(expected),
        }
    }

    fn alt(&mut self) -> Result<RegEx> {
        let first = self.concat()?;
        let mut rest = Vec::new();
        while self.eat('|') {
            rest.push(self.concat()?);
        }
        Ok(balance(first, rest, RegEx::union))
    }

    fn concat(&mut self) -> Result<RegEx> {
        let first = self.repeat()?;
        let mut rest = Vec::new();
        while !matches!(self.peek(), None | Some('|') | Some(')')) {
            rest.push(self.repeat()?);
        }
        Ok(balance(first, rest, RegEx::concat))
    }

    /// Stacked postfix operators count towards the nesting depth.
    fn repeat(&mut self) -> Result<RegEx> {
        let mut res = self.atom()?;
        let depth = self.depth;
        loop {
            res = match self.peek() {
                Some('*') => res.star(),
                Some('+') => res.plus(),
                Some('?') => res.optional(),
                _ => break,
            };
            if let Some((offset, _)) = self.next() {
                self.enter(offset)?;
            }
        }
        self.depth = depth;
        Ok(res)
    }

    fn enter(&mut self, offset: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(Error::NestingTooDeep { offset });
        }
        Ok(())
    }

    fn atom(&mut self) -> Result<RegEx> {
        match self.next() {
            None => end_of_input("an expression"),
            Some((offset, '(')) => {
                self.enter(offset)?;
                let res = self.alt()?;
                self.expect(')', "')'")?;
                self.depth -= 1;
                Ok(res.group())
            }
            Some((_, '[')) => self.class().map(RegEx::class),
            Some((_, '.')) => Ok(RegEx::class(CharClass::any_but_newline())),
            Some((_, '\\')) => Ok(match self.escape()? {
                Escaped::Char(c) => RegEx::literal(c),
                Escaped::Class(cls) => RegEx::class(cls),
            }),
            Some((offset, found)) if "|*+?)]".contains(found) =>
                Err(Error::UnknownConstruct { found, offset }),
            Some((_, c)) => Ok(RegEx::literal(c)),
        }
    }

    /// The backslash is already consumed.
    fn escape(&mut self) -> Result<Escaped> {
        let (offset, c) = match self.next() {
            Some(x) => x,
            None => return end_of_input("an escaped character"),
        };
        Ok(match c {
            'n' => Escaped::Char('\n'),
            't' => Escaped::Char('\t'),
            'r' => Escaped::Char('\r'),
            '0' => Escaped::Char('\0'),
            'd' => Escaped::Class(CharClass::digit()),
            'w' => Escaped::Class(CharClass::word()),
            's' => Escaped::Class(CharClass::space()),
            c if c == ' ' || c.is_ascii_punctuation() => Escaped::Char(c),
            found => return Err(Error::UnknownConstruct { found, offset }),
        })
    }

    /// The opening bracket is already consumed.
    fn class(&mut self) -> Result<CharClass> {
        let negated = self.eat('^');
        let mut ranges = Vec::new();
        loop {
            let (offset, c) = match self.next() {
                Some(x) => x,
                None => return end_of_input("']'"),
            };
            let begin = match c {
                ']' if ranges.is_empty() => return Err(Error::UnknownConstruct { found: c, offset }),
                ']' => break,
                '\\' => match self.escape()? {
                    Escaped::Char(c) => c,
                    Escaped::Class(cls) => {
                        ranges.extend_from_slice(cls.ranges());
                        continue;
                    }
                },
                c => c,
            };
            match self.range_dash() {
                Some(dash) => {
                    self.next();
                    let end = self.range_end()?;
                    let range = CharRange::new(begin, end)
                        .ok_or(Error::UnknownConstruct { found: '-', offset: dash })?;
                    ranges.push(range);
                }
                None => ranges.push(CharRange::from(begin)),
            }
        }
        let res = CharClass::from(ranges);
        Ok(if negated { res.negate() } else { res })
    }

    /// Offset of the dash, if it starts a range: not when it is the last member.
    fn range_dash(&self) -> Option<usize> {
        let mut ahead = self.input.clone();
        match ahead.next() {
            Some((dash, '-')) if !matches!(ahead.next(), None | Some((_, ']'))) => Some(dash),
            _ => None,
        }
    }

    fn range_end(&mut self) -> Result<char> {
        match self.next() {
            None => end_of_input("']'"),
            Some((offset, '\\')) => match self.escape()? {
                Escaped::Char(c) => Ok(c),
                Escaped::Class(_) => Err(Error::UnknownConstruct { found: '\\', offset }),
            },
            Some((_, c)) => Ok(c),
        }
    }
}
