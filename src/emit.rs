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

//! Rendering compiled tables into a self-contained Rust scanner module.
//!
//! The generated module holds a `TABLES` static followed by the scanner
//! runtime in `emit/scanner.rs`: `Table`, `Token`, `NoMatch` and a `Lexer`
//! iterator. It scans the same way [`rlex::Lexer`] does: longest match, then
//! the strictly higher precedence, then the rule declared first.

use proc_macro2::TokenStream;
use quote::quote;
use rlex::Table;

const RUNTIME: &str = include_str!("emit/scanner.rs");

fn table_tokens(t: &Table) -> TokenStream {
    let rule = t.rule();
    let name = rule.name();
    let precedence = rule.precedence();
    let discard = rule.is_discarded();
    let self_type = rule.is_self_typed();
    let entry = t.entry();
    let accepting = t.accepting().iter();
    let rows = (0..t.state_count()).map(|s| {
        let (chars, targets): (Vec<char>, Vec<usize>) = t.row(s).iter()
            .map(|(&c, &n)| (c, n))
            .unzip();
        quote! { &[#((#chars, #targets)),*] }
    });
    quote! {
        Table {
            name: #name,
            precedence: #precedence,
            discard: #discard,
            self_type: #self_type,
            entry: #entry,
            accepting: &[#(#accepting),*],
            transitions: &[#(#rows),*],
        }
    }
}

/// The `TABLES` static, as tokens.
pub fn tables_tokens(tables: &[Table]) -> TokenStream {
    let tables = tables.iter().map(table_tokens);
    quote! {
        /// All tables, in rule declaration order.
        pub static TABLES: &[Table] = &[#(#tables),*];
    }
}

/// The whole scanner module.
pub fn scanner_file(tables: &[Table]) -> syn::Result<syn::File> {
    let mut file = syn::parse_file(RUNTIME)?;
    file.items.insert(0, syn::parse2(tables_tokens(tables))?);
    Ok(file)
}

/// Render the scanner module source, headed by the rules it came from.
pub fn render(tables: &[Table]) -> syn::Result<String> {
    let file = scanner_file(tables)?;
    let mut out = String::from("// @generated by lexgen from the rules below. Do not edit.\n//\n");
    for t in tables {
        out.push_str(&format!("//     {}\n", t.rule()));
    }
    out.push('\n');
    out.push_str(&prettyplease::unparse(&file));
    trace!(pipeline, "rendered {} bytes of scanner for {} tables", out.len(), tables.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlex::{Rule, Attribute, compile_rules};

    #[allow(dead_code)]
    mod generated {
        include!("emit/scanner.rs");

        pub static TABLES: &[Table] = &[];
    }

    fn sample() -> Vec<Table> {
        compile_rules(&[
            Rule::new("WS", r"[ \t]+").unwrap().with_attribute(Attribute::Discard),
            Rule::new("NUM", "[0-9]+").unwrap().with_precedence(1),
            Rule::new("QUOTE", r"'|\\").unwrap().with_attribute(Attribute::SelfType),
        ]).unwrap()
    }

    /// The tables as `TABLES` would hold them, built at run time.
    fn runtime_tables(tables: &[Table]) -> &'static [generated::Table] {
        fn leak<T: 'static>(v: Vec<T>) -> &'static [T] { Box::leak(v.into_boxed_slice()) }
        leak(tables.iter().map(|t| generated::Table {
            name: Box::leak(t.rule().name().to_owned().into_boxed_str()),
            precedence: t.rule().precedence(),
            discard: t.rule().is_discarded(),
            self_type: t.rule().is_self_typed(),
            entry: t.entry(),
            accepting: leak(t.accepting().iter().copied().collect()),
            transitions: leak((0..t.state_count())
                .map(|s| leak(t.row(s).iter().map(|(&c, &n)| (c, n)).collect()))
                .collect()),
        }).collect())
    }

    fn scanning_rules() -> Vec<Table> {
        compile_rules(&[
            Rule::new("WS", r"[ \t]+").unwrap().with_attribute(Attribute::Discard),
            Rule::new("IF", "if").unwrap(),
            Rule::new("ID", "[a-zA-Z][a-zA-Z0-9]*").unwrap(),
            Rule::new("NUM", "[0-9]+").unwrap(),
            Rule::new("KEYWORD42", "42").unwrap().with_precedence(1),
            Rule::new("OP", r"\+|-").unwrap().with_attribute(Attribute::SelfType),
        ]).unwrap()
    }

    fn scan(tables: &'static [generated::Table], input: &str) -> Vec<String> {
        generated::Lexer::with_tables(tables, input)
            .map(|t| match t {
                Ok(t) => format!("{}={}", t.kind, t.text),
                Err(e) => format!("!{}", e.offset),
            })
            .collect()
    }

    #[test]
    fn test_generated_scanner() {
        let tables = runtime_tables(&scanning_rules());
        assert_eq!(scan(tables, "a1"), ["ID=a1"]);
        assert_eq!(scan(tables, "42"), ["KEYWORD42=42"]);
        assert_eq!(scan(tables, "421"), ["NUM=421"]);
        assert_eq!(scan(tables, "if iff"), ["IF=if", "ID=iff"]);
        assert_eq!(scan(tables, " \t "), Vec::<String>::new());
        assert_eq!(scan(tables, "a?b"), ["ID=a", "!1", "ID=b"]);

        let tokens = generated::Lexer::with_tables(tables, "1 + x")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tokens.iter().map(|t| t.payload).collect::<Vec<_>>(), [None, Some("+"), None]);
        assert_eq!(tokens[1].span, 2..3);

        let mut lexer = generated::Lexer::with_tables(tables, "é42");
        let err = lexer.next().unwrap().unwrap_err();
        assert_eq!(err, generated::NoMatch { offset: 0, found: 'é' });
        assert_eq!(err.to_string(), "no rule matches 'é' at offset 0");
        assert_eq!(lexer.offset(), 2);
        assert_eq!(lexer.next().unwrap().unwrap().kind, "KEYWORD42");
        lexer.restart();
        assert_eq!(lexer.offset(), 0);
        assert!(generated::Lexer::new("x").next().unwrap().is_err());
    }

    #[test]
    fn test_generated_scanner_agrees_with_reference() {
        let compiled = scanning_rules();
        let tables = runtime_tables(&compiled);
        let inputs = ["", "x42 xx -  a9z+", "é42", "?1", "if42if", "4242 42a", "+-+", "iF if0 ifz"];
        for input in inputs.iter() {
            let generated = generated::Lexer::with_tables(tables, input)
                .map(|t| t
                    .map(|t| (t.kind, t.text, t.payload, t.span))
                    .map_err(|e| (e.offset, e.found)))
                .collect::<Vec<_>>();
            let reference = rlex::Lexer::new(&compiled, input)
                .map(|t| t
                    .map(|t| (t.kind, t.text, t.payload, t.span))
                    .map_err(|e| (e.offset, e.found)))
                .collect::<Vec<_>>();
            assert_eq!(generated, reference, "scanning {:?}", input);
        }
    }

    #[test]
    fn test_tables_static() {
        let tables = compile_rules(&[
            Rule::new("A", "ab?").unwrap().with_precedence(3).with_attribute(Attribute::SelfType),
        ]).unwrap();
        let rendered = syn::File {
            shebang: None,
            attrs: Vec::new(),
            items: vec![syn::parse2(tables_tokens(&tables)).unwrap()],
        };
        let expected = syn::parse_file(r#"
            /// All tables, in rule declaration order.
            pub static TABLES: &[Table] = &[Table {
                name: "A",
                precedence: 3i64,
                discard: false,
                self_type: true,
                entry: 0usize,
                accepting: &[1usize, 2usize],
                transitions: &[&[('a', 1usize)], &[('b', 2usize)], &[]],
            }];
        "#).unwrap();
        assert_eq!(prettyplease::unparse(&rendered), prettyplease::unparse(&expected));
    }

    #[test]
    fn test_render_is_valid_rust() {
        let src = render(&sample()).unwrap();
        let file = syn::parse_file(&src).unwrap();
        let names = file.items.iter()
            .filter_map(|item| match item {
                syn::Item::Struct(s) => Some(s.ident.to_string()),
                syn::Item::Static(s) => Some(s.ident.to_string()),
                syn::Item::Fn(f) => Some(f.sig.ident.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(names, ["TABLES", "Table", "Token", "NoMatch", "longest_match", "Lexer"]);
    }

    #[test]
    fn test_render_header_and_tables() {
        let src = render(&sample()).unwrap();
        let mut lines = src.lines();
        assert_eq!(lines.next(), Some("// @generated by lexgen from the rules below. Do not edit."));
        assert_eq!(lines.next(), Some("//"));
        assert_eq!(lines.next(), Some(r"//     @discard WS : [ \t]+"));
        assert_eq!(lines.next(), Some("//     @1 NUM : [0-9]+"));
        assert_eq!(lines.next(), Some(r"//     @self QUOTE : '|\\"));
        assert!(src.contains(r#"name: "NUM""#));
        assert!(src.contains("precedence: 1i64"));
        assert!(src.contains(r"'\''"));
        assert!(src.contains(r"'\\'"));
        assert!(!src.contains("GNU Affero"));
    }

    #[test]
    fn test_render_empty() {
        let src = render(&[]).unwrap();
        assert!(syn::parse_file(&src).is_ok());
        assert!(src.contains("pub static TABLES: &[Table] = &[];"));
    }
}
