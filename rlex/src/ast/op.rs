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

use std::fmt::{Display, Formatter};

use super::char_class::{CharClass, write_escaped};

/// Regex operators, with sub-expressions of type `R`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RegOp<R> {
    Literal(char),
    Class(CharClass),
    Concat(R, R),
    Union(R, R),
    Star(R),
    Plus(R),
    Optional(R),
    Group(R),
}

impl<R> RegOp<R> {
    pub fn map<S>(self, mut g: impl FnMut(R) -> S) -> RegOp<S> {
        match self {
            RegOp::Literal(c) => RegOp::Literal(c),
            RegOp::Class(cls) => RegOp::Class(cls),
            RegOp::Concat(l, r) => {
                let l = g(l);
                RegOp::Concat(l, g(r))
            }
            RegOp::Union(l, r) => {
                let l = g(l);
                RegOp::Union(l, g(r))
            }
            RegOp::Star(r) => RegOp::Star(g(r)),
            RegOp::Plus(r) => RegOp::Plus(g(r)),
            RegOp::Optional(r) => RegOp::Optional(g(r)),
            RegOp::Group(r) => RegOp::Group(g(r)),
        }
    }
}

pub trait Pretty {
    type Context;
    fn pretty_fmt(&self, f: &mut Formatter<'_>, context: Self::Context) -> std::fmt::Result;
}

impl<P: Pretty> Pretty for &P {
    type Context = P::Context;
    fn pretty_fmt(&self, f: &mut Formatter<'_>, context: Self::Context) -> std::fmt::Result {
        P::pretty_fmt(self, f, context)
    }
}

impl<P: Pretty> Pretty for Box<P> {
    type Context = P::Context;
    fn pretty_fmt(&self, f: &mut Formatter<'_>, context: Self::Context) -> std::fmt::Result {
        P::pretty_fmt(self, f, context)
    }
}

/// Characters escaped when printed outside a class.
pub const META_CHARS: &str = r"\|*+?()[].";

fn infix(f: &mut Formatter<'_>, l: impl Pretty<Context=usize>, r: impl Pretty<Context=usize>,
         (k, sep): (usize, &str), n: usize) -> std::fmt::Result {
    if k < n { write!(f, "(")?; }
    l.pretty_fmt(f, k)?;
    write!(f, "{}", sep)?;
    r.pretty_fmt(f, k)?;
    if k < n { write!(f, ")")?; }
    Ok(())
}

fn postfix(f: &mut Formatter<'_>, x: impl Pretty<Context=usize>,
           (k, op): (usize, &str), n: usize) -> std::fmt::Result {
    if k < n { write!(f, "(")?; }
    x.pretty_fmt(f, k)?;
    if k < n { write!(f, ")")?; }
    write!(f, "{}", op)
}

impl<R: Pretty<Context=usize>> Pretty for RegOp<R> {
    type Context = usize;
    fn pretty_fmt(&self, f: &mut Formatter<'_>, n: usize) -> std::fmt::Result {
        match self {
            RegOp::Literal(c) => write_escaped(f, *c, META_CHARS),
            RegOp::Class(cls) => write!(f, "{}", cls),
            RegOp::Union(l, r) => infix(f, l, r, (0, "|"), n),
            RegOp::Concat(l, r) => infix(f, l, r, (1, ""), n),
            RegOp::Star(r) => postfix(f, r, (2, "*"), n),
            RegOp::Plus(r) => postfix(f, r, (2, "+"), n),
            RegOp::Optional(r) => postfix(f, r, (2, "?"), n),
            RegOp::Group(r) => {
                write!(f, "(")?;
                r.pretty_fmt(f, 0)?;
                write!(f, ")")
            }
        }
    }
}

impl<R: Pretty<Context=usize>> Display for RegOp<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.pretty_fmt(f, 0)
    }
}
