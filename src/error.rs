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

//! Error reporting for the lexer generator.

use std::fmt::{Display, Formatter};

/// Everything that stops a scanner from being generated.
#[derive(Debug)]
pub enum Error {
    /// A specification line could not be turned into a rule.
    Load {
        /// 1-based line number in the specification text.
        line: usize,
        /// What went wrong.
        error: rlex::Error,
    },
    /// A rule pattern could not be compiled.
    Compile {
        /// Name of the offending rule.
        rule: String,
        /// What went wrong.
        error: rlex::Error,
    },
    /// The scanner template did not render into valid Rust.
    Emit(syn::Error),
    /// Writing the generated scanner failed.
    Io(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Load { line, error } => write!(f, "line {}: {}", line, error),
            Error::Compile { rule, error } => write!(f, "rule '{}': {}", rule, error),
            Error::Emit(e) => write!(f, "cannot render scanner: {}", e),
            Error::Io(e) => write!(f, "cannot write scanner: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load { error, .. } | Error::Compile { error, .. } => Some(error),
            Error::Emit(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self { Error::Io(e) }
}

impl From<syn::Error> for Error {
    fn from(e: syn::Error) -> Self { Error::Emit(e) }
}

/// Result type for the generator.
pub type Result<T> = std::result::Result<T, Error>;
