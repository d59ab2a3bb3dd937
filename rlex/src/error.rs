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

//! Errors reported while loading and compiling token rules.

use std::fmt::{Display, Formatter};

/// An exhaustive list of compile-time errors.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Error {
    /// A rule line is ill-formed: no colon, no name, or a bad attribute.
    WrongInputFormat,
    /// A rule name or pattern is empty after trimming.
    TooShort,
    /// The regex parser met a character or operator it cannot classify.
    UnknownConstruct {
        /// The offending character.
        found: char,
        /// Byte offset of `found` in the pattern.
        offset: usize,
    },
    /// The pattern ended while a construct was still open.
    UnexpectedEndOfInput(String),
    /// Groups or postfix operators nest deeper than [`crate::syntax::MAX_NESTING`].
    NestingTooDeep {
        /// Byte offset of the construct going too deep.
        offset: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::WrongInputFormat => write!(f, "the input is ill-formed"),
            Error::TooShort => write!(f, "too short (ill-formed input)"),
            Error::UnknownConstruct { found, offset } =>
                write!(f, "encountered unknown construct '{}' at offset {}",
                       found.escape_debug(), offset),
            Error::UnexpectedEndOfInput(expected) =>
                write!(f, "unexpected end of input, expected {}", expected),
            Error::NestingTooDeep { offset } =>
                write!(f, "nesting too deep at offset {}", offset),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for rule compilation.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Error::WrongInputFormat.to_string(), "the input is ill-formed");
        assert_eq!(
            Error::UnknownConstruct { found: '\t', offset: 3 }.to_string(),
            r"encountered unknown construct '\t' at offset 3");
        assert_eq!(
            Error::UnexpectedEndOfInput("')'".to_string()).to_string(),
            "unexpected end of input, expected ')'");
        assert_eq!(Error::NestingTooDeep { offset: 7 }.to_string(), "nesting too deep at offset 7");
    }
}
