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

//! Loading token rules from specification text.
//!
//! One rule per line: `[attributes] NAME : PATTERN`. Everything before the
//! first colon is split on whitespace; the last word is the rule name, the
//! others are attributes (`@discard`, `@self`, or `@<integer>` for the
//! precedence). The pattern is the rest of the line, trimmed, and may itself
//! contain colons. Empty lines are skipped; a line holding only whitespace
//! is malformed like any other line without a colon.

use std::str::FromStr;

use rlex::{Rule, Attribute};

use crate::error::{Error, Result};

/// An attribute word on the left-hand side of a rule.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Annotation {
    /// `@discard`
    Discard,
    /// `@self`
    SelfType,
    /// `@<integer>`
    Precedence(i64),
}

impl FromStr for Annotation {
    type Err = rlex::Error;

    fn from_str(s: &str) -> rlex::Result<Self> {
        match s {
            "@discard" => Ok(Annotation::Discard),
            "@self" => Ok(Annotation::SelfType),
            _ => s.strip_prefix('@')
                .and_then(|n| n.parse().ok())
                .map(Annotation::Precedence)
                .ok_or(rlex::Error::WrongInputFormat),
        }
    }
}

impl Annotation {
    /// Apply this annotation to `rule`.
    pub fn apply(self, rule: Rule) -> Rule {
        match self {
            Annotation::Discard => rule.with_attribute(Attribute::Discard),
            Annotation::SelfType => rule.with_attribute(Attribute::SelfType),
            Annotation::Precedence(p) => rule.with_precedence(p),
        }
    }
}

/// Parse a single specification line.
///
/// ```
/// # use lexgen::loader::parse_line;
/// let r = parse_line("@discard @-1 WS : [ \\t]+").unwrap();
/// assert_eq!((r.name(), r.pattern(), r.precedence()), ("WS", r"[ \t]+", -1));
/// assert!(r.is_discarded());
/// ```
pub fn parse_line(line: &str) -> rlex::Result<Rule> {
    let mut split = line.splitn(2, ':');
    let (lhs, rhs) = match (split.next(), split.next()) {
        (Some(lhs), Some(rhs)) => (lhs, rhs),
        _ => return Err(rlex::Error::WrongInputFormat),
    };
    let mut words = lhs.split_whitespace().collect::<Vec<_>>();
    let name = words.pop().ok_or(rlex::Error::WrongInputFormat)?;
    let annotations = words.into_iter()
        .map(str::parse)
        .collect::<rlex::Result<Vec<Annotation>>>()?;
    let rule = Rule::new(name, rhs)?;
    Ok(annotations.into_iter().fold(rule, |rule, a| a.apply(rule)))
}

/// Load every rule in `text`, in order. The first bad line aborts loading.
pub fn load(text: &str) -> Result<Vec<Rule>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| parse_line(line).map_err(|error| Error::Load { line: n + 1, error }))
        .collect()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use rlex::Error::{WrongInputFormat, TooShort};

    #[test]
    fn test_parse_line() {
        let r = parse_line("@1 NUM : [0-9]+").unwrap();
        assert_eq!((r.name(), r.pattern(), r.precedence()), ("NUM", "[0-9]+", 1));
        assert!(r.attributes().is_empty());
        let r = parse_line("ID : [a-zA-Z][a-zA-Z0-9]*").unwrap();
        assert_eq!(r.precedence(), 0);
        let r = parse_line("@self COLON : :").unwrap();
        assert_eq!(r.pattern(), ":");
        assert!(r.is_self_typed() && !r.is_discarded());
        let r = parse_line("  TIME\t:  [0-9]+:[0-9]+ ").unwrap();
        assert_eq!((r.name(), r.pattern()), ("TIME", "[0-9]+:[0-9]+"));
        let r = parse_line("@1 @self @discard @7 X : x").unwrap();
        assert_eq!(r.precedence(), 7);
        assert_eq!(r.attributes().len(), 2);
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse_line("FOO"), Err(WrongInputFormat));
        assert_eq!(parse_line("TYPE :    "), Err(TooShort));
        assert_eq!(parse_line("@ BAR : a"), Err(WrongInputFormat));
        assert_eq!(parse_line("   : a"), Err(WrongInputFormat));
        assert_eq!(parse_line("@fast BAR : a"), Err(WrongInputFormat));
        assert_eq!(parse_line("discard BAR : a"), Err(WrongInputFormat));
        assert_eq!(parse_line("@1.5 BAR : a"), Err(WrongInputFormat));
    }

    #[test]
    fn test_annotation() {
        assert_eq!("@discard".parse::<Annotation>(), Ok(Annotation::Discard));
        assert_eq!("@self".parse::<Annotation>(), Ok(Annotation::SelfType));
        assert_eq!("@-3".parse::<Annotation>(), Ok(Annotation::Precedence(-3)));
        assert_eq!("@".parse::<Annotation>(), Err(WrongInputFormat));
    }

    #[test]
    fn test_load() {
        let rules = load(indoc! {r"
            @discard WS : [ \t]+

            @1 NUM : [0-9]+
            ID : [a-zA-Z][a-zA-Z0-9]*
        "}).unwrap();
        assert_eq!(rules.iter().map(|r| r.name()).collect::<Vec<_>>(), ["WS", "NUM", "ID"]);
        match load("A : a\nB : (b\nC\n") {
            Err(Error::Load { line, error }) => assert_eq!((line, error), (3, WrongInputFormat)),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_whitespace_only_line() {
        assert_eq!(load("A : a\n\nB : b\n").unwrap().len(), 2);
        match load("A : a\n  \t\nB : b") {
            Err(Error::Load { line, error }) => assert_eq!((line, error), (2, WrongInputFormat)),
            r => panic!("unexpected {:?}", r),
        }
    }
}
