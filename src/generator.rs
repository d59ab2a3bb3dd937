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

//! The generation pipeline: load rules, compile tables, render and write.

use std::path::{Path, PathBuf};

use rlex::{Rule, Table};

use crate::error::{Error, Result};
use crate::{emit, loader};

/// Knobs for the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print the parsed rules and compiled tables to stdout.
    pub verbose: bool,
}

/// State threaded through the pipeline stages.
#[derive(Debug, Default)]
pub struct Generator {
    options: Options,
    rules: Vec<Rule>,
    tables: Vec<Table>,
}

fn print_block(title: &str, items: impl Iterator<Item=impl std::fmt::Display>) {
    println!("{}: {{", title);
    for x in items { println!("    {}", x) }
    println!("}}");
}

impl Generator {
    /// An empty generator.
    pub fn new(options: Options) -> Self {
        Generator { options, ..Self::default() }
    }

    /// Load rules from specification text, replacing any previous ones.
    pub fn load(mut self, text: &str) -> Result<Self> {
        self.rules = loader::load(text)?;
        self.tables.clear();
        trace!(pipeline, "loaded {} rules", self.rules.len());
        if self.options.verbose {
            print_block("Parsed specification", self.rules.iter());
        }
        Ok(self)
    }

    /// Compile every loaded rule. Stops at the first rule that fails.
    pub fn compile(mut self) -> Result<Self> {
        self.tables = self.rules.iter()
            .map(|rule| rlex::compile_rule(rule).map_err(|error| Error::Compile {
                rule: rule.name().to_owned(),
                error,
            }))
            .collect::<Result<_>>()?;
        trace!(pipeline, "compiled {} tables", self.tables.len());
        if self.options.verbose {
            print_block("Generated tables", self.tables.iter());
        }
        Ok(self)
    }

    /// Rules loaded so far.
    pub fn rules(&self) -> &[Rule] { &self.rules }

    /// Tables compiled so far.
    pub fn tables(&self) -> &[Table] { &self.tables }

    /// Scanner source for the compiled tables.
    pub fn render(&self) -> Result<String> {
        Ok(emit::render(&self.tables)?)
    }

    /// Write the scanner as `<dir>/<name>.rs`, creating `dir` if needed.
    pub fn write_to(&self, dir: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
        let source = self.render()?;
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.rs", name));
        std::fs::write(&path, source)?;
        trace!(pipeline, "wrote {}", path.display());
        if self.options.verbose {
            println!("Created {}", path.display());
        }
        Ok(path)
    }
}

/// Run the whole pipeline over specification text.
///
/// Nothing is written unless every rule loads and compiles.
pub fn generate(text: &str, dir: impl AsRef<Path>, name: &str, options: Options) -> Result<PathBuf> {
    Generator::new(options)
        .load(text)?
        .compile()?
        .write_to(dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use crate::utils::setup_logger;

    const SPEC: &str = indoc! {r"
        @discard WS : [ \t\n]+
        @1 IF : if
        @self ID : [a-z]+
        NUM : [0-9]+
    "};

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lexgen-{}-{}", std::process::id(), tag));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_stages() {
        setup_logger();
        let gen = Generator::new(Options::default()).load(SPEC).unwrap();
        assert_eq!(gen.rules().len(), 4);
        assert!(gen.tables().is_empty());
        let gen = gen.compile().unwrap();
        let names = gen.tables().iter().map(|t| t.rule().name()).collect::<Vec<_>>();
        assert_eq!(names, ["WS", "IF", "ID", "NUM"]);
        let kinds = rlex::tokenize(gen.tables(), "if x1")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, ["IF", "ID", "NUM"]);
    }

    #[test]
    fn test_compile_error_names_rule() {
        setup_logger();
        let err = Generator::default()
            .load("A : a\nB : (b\nC : c")
            .and_then(Generator::compile)
            .unwrap_err();
        match err {
            Error::Compile { rule, error } => {
                assert_eq!(rule, "B");
                assert_eq!(error, rlex::Error::UnexpectedEndOfInput("')'".to_owned()));
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_generate_writes_file() {
        setup_logger();
        let dir = scratch_dir("ok");
        let path = generate(SPEC, &dir, "tokens", Options::default()).unwrap();
        assert_eq!(path, dir.join("tokens.rs"));
        let source = std::fs::read_to_string(&path).unwrap();
        assert!(source.starts_with("// @generated by lexgen"));
        assert!(syn::parse_file(&source).is_ok());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_generate_fail_fast() {
        setup_logger();
        let dir = scratch_dir("fail");
        let err = generate("A : a\nB : b|*\n", &dir, "tokens", Options::default()).unwrap_err();
        assert!(matches!(err, Error::Compile { ref rule, .. } if rule == "B"));
        assert!(!dir.exists());

        let err = generate("A : a\n: b\n", &dir, "tokens", Options::default()).unwrap_err();
        assert!(matches!(err, Error::Load { line: 2, .. }));
        assert!(!dir.exists());
    }
}
