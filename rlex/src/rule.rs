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

//! Token rules: the input of the compiler core.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// Flags a rule may carry, changing how its matches are reported.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Attribute {
    /// Matches are consumed, but never emitted as tokens.
    Discard,
    /// The token payload is the matched text itself.
    SelfType,
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Discard => write!(f, "@discard"),
            Attribute::SelfType => write!(f, "@self"),
        }
    }
}

/// A token rule.
///
/// ```
/// # use rlex::{Rule, Attribute};
/// let ws = Rule::new("WS", "[ \t]+").unwrap().with_attribute(Attribute::Discard);
/// assert!(ws.is_discarded());
/// assert_eq!(ws.to_string(), "@discard WS : [ \t]+");
/// assert!(Rule::new(" ", "a").is_err());
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rule {
    name: String,
    pattern: String,
    precedence: i64,
    attributes: BTreeSet<Attribute>,
}

impl Rule {
    /// Create a rule with default precedence and no attributes.
    /// Both `name` and `pattern` are trimmed, and must not be empty.
    pub fn new(name: &str, pattern: &str) -> Result<Self> {
        let (name, pattern) = (name.trim(), pattern.trim());
        if name.is_empty() || pattern.is_empty() {
            return Err(Error::TooShort);
        }
        Ok(Rule {
            name: name.to_string(),
            pattern: pattern.to_string(),
            precedence: 0,
            attributes: BTreeSet::new(),
        })
    }

    /// Set the precedence.
    pub fn with_precedence(mut self, precedence: i64) -> Self {
        self.precedence = precedence;
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attr: Attribute) -> Self {
        self.attributes.insert(attr);
        self
    }

    /// The token kind identifier.
    pub fn name(&self) -> &str { &self.name }

    /// The regex source.
    pub fn pattern(&self) -> &str { &self.pattern }

    /// Tie-break among longest matches, higher wins.
    pub fn precedence(&self) -> i64 { self.precedence }

    /// Attributes on this rule.
    pub fn attributes(&self) -> &BTreeSet<Attribute> { &self.attributes }

    /// Whether this rule carries `attr`.
    pub fn has(&self, attr: Attribute) -> bool { self.attributes.contains(&attr) }

    /// Whether matches of this rule are dropped from the token stream.
    pub fn is_discarded(&self) -> bool { self.has(Attribute::Discard) }

    /// Whether tokens of this rule carry their text as payload.
    pub fn is_self_typed(&self) -> bool { self.has(Attribute::SelfType) }
}

/// Renders the rule in the specification line format.
impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for attr in &self.attributes {
            write!(f, "{} ", attr)?;
        }
        if self.precedence != 0 {
            write!(f, "@{} ", self.precedence)?;
        }
        write!(f, "{} : {}", self.name, self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule() {
        let r = Rule::new("  NUM ", " [0-9]+ ").unwrap().with_precedence(1);
        assert_eq!(r.name(), "NUM");
        assert_eq!(r.pattern(), "[0-9]+");
        assert_eq!(r.precedence(), 1);
        assert!(r.attributes().is_empty());
        assert_eq!(r.to_string(), "@1 NUM : [0-9]+");
        assert_eq!(Rule::new("TYPE", "   "), Err(Error::TooShort));
        assert_eq!(Rule::new("", "a"), Err(Error::TooShort));
    }

    #[test]
    fn test_attributes() {
        let r = Rule::new("OP", r"\+|-").unwrap()
            .with_attribute(Attribute::SelfType)
            .with_attribute(Attribute::Discard)
            .with_attribute(Attribute::SelfType);
        assert_eq!(r.attributes().len(), 2);
        assert!(r.is_discarded() && r.is_self_typed());
        assert_eq!(r.to_string(), r"@discard @self OP : \+|-");
    }
}
