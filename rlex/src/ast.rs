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

//! Regex abstract syntax.

pub mod char_class;
pub mod op;

pub use char_class::{CharClass, CharRange};
pub use op::RegOp;

use std::fmt::{Display, Formatter};
use op::Pretty;

/// `RegEx = fix RegOp`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RegEx(Box<RegOp<RegEx>>);

impl RegEx {
    /// Wrap one layer of operator.
    pub fn new(op: RegOp<RegEx>) -> Self { RegEx(Box::new(op)) }

    /// The outermost operator.
    pub fn op(&self) -> &RegOp<RegEx> { &self.0 }

    /// `fold` for fixed points, children first.
    pub fn fold<B>(self, f: &mut impl FnMut(RegOp<B>) -> B) -> B {
        let op = (*self.0).map(|r| r.fold(&mut *f));
        f(op)
    }

    pub fn literal(c: char) -> Self { RegEx::new(RegOp::Literal(c)) }
    pub fn class(cls: CharClass) -> Self { RegEx::new(RegOp::Class(cls)) }
    pub fn concat(self, r: RegEx) -> Self { RegEx::new(RegOp::Concat(self, r)) }
    pub fn union(self, r: RegEx) -> Self { RegEx::new(RegOp::Union(self, r)) }
    pub fn star(self) -> Self { RegEx::new(RegOp::Star(self)) }
    pub fn plus(self) -> Self { RegEx::new(RegOp::Plus(self)) }
    pub fn optional(self) -> Self { RegEx::new(RegOp::Optional(self)) }
    pub fn group(self) -> Self { RegEx::new(RegOp::Group(self)) }
}

impl Pretty for RegEx {
    type Context = usize;
    fn pretty_fmt(&self, f: &mut Formatter<'_>, n: usize) -> std::fmt::Result {
        self.0.pretty_fmt(f, n)
    }
}

impl Display for RegEx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.pretty_fmt(f, 0)
    }
}
