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

//! Character classes.

use std::fmt::{Display, Formatter};

/// Inclusive character range `begin ..= end`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CharRange {
    begin: char,
    end: char,
}

impl CharRange {
    /// Create a new [`CharRange`], both endpoints included.
    /// Returns `None` if `begin > end`.
    pub fn new(begin: char, end: char) -> Option<Self> {
        if begin <= end { Some(CharRange { begin, end }) } else { None }
    }

    /// The lowest character in the range.
    pub fn begin(&self) -> char { self.begin }

    /// The highest character in the range.
    pub fn end(&self) -> char { self.end }

    /// Check whether `c` lies within this range.
    pub fn contains(&self, c: char) -> bool { self.begin <= c && c <= self.end }

    /// Iterate over every character in the range.
    pub fn chars(&self) -> std::ops::RangeInclusive<char> { self.begin..=self.end }
}

impl From<char> for CharRange {
    fn from(c: char) -> Self { CharRange { begin: c, end: c } }
}

impl Display for CharRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.begin == self.end {
            write_class_member(f, self.begin)
        } else {
            write_class_member(f, self.begin)?;
            write!(f, "-")?;
            write_class_member(f, self.end)
        }
    }
}

/// Write a character in its escaped form, as it would appear in a pattern.
pub(crate) fn write_escaped(f: &mut Formatter<'_>, c: char, special: &str) -> std::fmt::Result {
    match c {
        '\n' => write!(f, r"\n"),
        '\t' => write!(f, r"\t"),
        '\r' => write!(f, r"\r"),
        '\0' => write!(f, r"\0"),
        c if special.contains(c) => write!(f, "\\{}", c),
        c => write!(f, "{}", c),
    }
}

fn write_class_member(f: &mut Formatter<'_>, c: char) -> std::fmt::Result {
    write_escaped(f, c, r"\[]-^")
}

/// A set of characters, stored as sorted, disjoint, non-adjacent ranges.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct CharClass {
    ranges: Vec<CharRange>,
}

/// Characters `.` and negated classes range over.
pub const ASCII: CharRange = CharRange { begin: '\0', end: '\x7F' };

impl CharClass {
    /// The empty class.
    pub fn empty() -> Self { CharClass { ranges: Vec::new() } }

    /// Build a class from arbitrary characters.
    pub fn from_chars(cs: impl IntoIterator<Item=char>) -> Self {
        cs.into_iter().map(CharRange::from).collect::<Vec<_>>().into()
    }

    /// `\d`: ASCII digits.
    pub fn digit() -> Self { CharRange { begin: '0', end: '9' }.into() }

    /// `\w`: ASCII letters, digits, and the underscore.
    pub fn word() -> Self {
        vec![
            CharRange { begin: '0', end: '9' },
            CharRange { begin: 'A', end: 'Z' },
            CharRange { begin: 'a', end: 'z' },
            CharRange::from('_'),
        ].into()
    }

    /// `\s`: ASCII whitespaces.
    pub fn space() -> Self { CharClass::from_chars(" \t\n\r\x0B\x0C".chars()) }

    /// `.`: any ASCII character except the line feed.
    pub fn any_but_newline() -> Self { CharClass::from('\n').negate() }

    /// Complement with regard to [`ASCII`].
    pub fn negate(&self) -> Self {
        CharClass::from_chars(ASCII.chars().filter(|c| !self.contains(*c)))
    }

    /// Check whether `c` is a member.
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|r| if r.end < c {
                std::cmp::Ordering::Less
            } else if r.begin > c {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            })
            .is_ok()
    }

    /// Check whether the class has no member at all.
    pub fn is_empty(&self) -> bool { self.ranges.is_empty() }

    /// The underlying ranges.
    pub fn ranges(&self) -> &[CharRange] { &self.ranges }

    /// Every member character, in ascending order.
    pub fn chars(&self) -> impl Iterator<Item=char> + '_ {
        self.ranges.iter().flat_map(CharRange::chars)
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for r in self.ranges.iter() {
            write!(f, "{}", r)?;
        }
        write!(f, "]")
    }
}

impl From<char> for CharClass {
    fn from(c: char) -> Self { CharClass { ranges: vec![c.into()] } }
}

impl From<CharRange> for CharClass {
    fn from(r: CharRange) -> Self { CharClass { ranges: vec![r] } }
}

fn adjacent(last: CharRange, next: CharRange) -> bool {
    last.end as u32 + 1 >= next.begin as u32
}

impl From<Vec<CharRange>> for CharClass {
    fn from(mut ranges: Vec<CharRange>) -> Self {
        ranges.sort();
        if ranges.is_empty() { return CharClass { ranges }; }
        let mut next_to_write = 1;
        for i in 1..ranges.len() {
            let last = next_to_write - 1;
            if adjacent(ranges[last], ranges[i]) {
                ranges[last] = CharRange {
                    begin: ranges[last].begin,
                    end: std::cmp::max(ranges[last].end, ranges[i].end),
                }
            } else {
                ranges[next_to_write] = ranges[i];
                next_to_write += 1
            }
        }
        ranges.truncate(next_to_write);
        CharClass { ranges }
    }
}
