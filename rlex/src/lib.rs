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

//! Compile token rules into DFA transition tables for table-driven scanners.
//!
//! Each rule goes through the same pipeline: the pattern is parsed
//! ([`syntax::parse`]), compiled into an NFA ([`automata::builder::build`]),
//! determinized ([`NFA::determine`]), and flattened into a [`Table`].

#[macro_use]
mod utils;

pub mod error;
pub mod rule;
pub mod ast;
pub mod syntax;
pub mod automata;
pub mod table;
pub mod lexer;

pub use error::{Error, Result};
pub use rule::{Rule, Attribute};
pub use automata::{NFA, DFA};
pub use table::Table;
pub use lexer::{Lexer, Token, NoMatch, tokenize};

/// Compile a single rule.
pub fn compile_rule(rule: &Rule) -> Result<Table> {
    let regex = syntax::parse(rule.pattern())?;
    let nfa = automata::builder::build(regex);
    let dfa = nfa.determine();
    Ok(Table::compile(dfa, rule))
}

/// Compile every rule, in order. The first failure aborts the whole batch.
///
/// ```
/// # use rlex::{Rule, Error, compile_rules};
/// let good = Rule::new("A", "a").unwrap();
/// let bad = Rule::new("B", "(b").unwrap();
/// assert_eq!(compile_rules(&[good.clone()]).unwrap().len(), 1);
/// assert!(matches!(compile_rules(&[good, bad]), Err(Error::UnexpectedEndOfInput(_))));
/// ```
pub fn compile_rules(rules: &[Rule]) -> Result<Vec<Table>> {
    rules.iter().map(compile_rule).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_rules_in_order() {
        let rules = [("A", "a"), ("B", "b+"), ("C", "[cd]?e")].iter()
            .map(|&(name, pattern)| Rule::new(name, pattern).unwrap())
            .collect::<Vec<_>>();
        let tables = compile_rules(&rules).unwrap();
        assert_eq!(tables.iter().map(|t| t.rule().name()).collect::<String>(), "ABC");
        assert!(tables[1].matches("bbb"));
        assert!(tables[2].matches("de") && tables[2].matches("e"));
    }

    #[test]
    fn test_fail_fast() {
        let rules = vec![
            Rule::new("A", "a").unwrap(),
            Rule::new("B", "b|*").unwrap(),
            Rule::new("C", "[c").unwrap(),
        ];
        assert_eq!(compile_rules(&rules), Err(Error::UnknownConstruct { found: '*', offset: 2 }));
        assert_eq!(compile_rules(&rules[2..]), Err(Error::UnexpectedEndOfInput("']'".to_string())));
    }

    #[test]
    fn test_long_patterns() {
        let text = "ab".repeat(5000);
        let t = compile_rule(&Rule::new("L", &text).unwrap()).unwrap();
        assert_eq!(t.state_count(), text.len() + 1);
        assert!(t.matches(&text) && !t.matches(&text[1..]));
        let tokens = tokenize(std::slice::from_ref(&t), &text).unwrap();
        assert_eq!(tokens.len(), 1);

        let deep = format!("{}a{}", "(".repeat(5000), ")".repeat(5000));
        let rule = Rule::new("D", &deep).unwrap();
        assert_eq!(compile_rule(&rule), Err(Error::NestingTooDeep { offset: syntax::MAX_NESTING }));
    }
}
