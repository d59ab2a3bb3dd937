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

//! Generate table-driven scanners from token rule specifications.
//!
//! A specification holds one rule per line:
//!
//! ```text
//! @discard WS : [ \t\n]+
//! @1 IF : if
//! @self ID : [a-z][a-z0-9]*
//! ```
//!
//! Each rule is compiled by [`rlex`] into a DFA transition table, and the
//! tables are rendered into a standalone Rust scanner module.
//!
//! ```
//! use lexgen::{Generator, Options};
//! let gen = Generator::new(Options::default())
//!     .load("@discard WS : [ ]+\n@self ID : [a-z]+")?
//!     .compile()?;
//! let source = gen.render()?;
//! assert!(source.contains("pub struct Lexer"));
//! # Ok::<(), lexgen::Error>(())
//! ```

#[macro_use]
mod utils;

pub mod error;
pub mod loader;
pub mod emit;
pub mod generator;

pub use rlex;
pub use error::{Error, Result};
pub use generator::{Generator, Options, generate};
