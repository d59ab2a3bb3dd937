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

use clap::{Arg, App, SubCommand};

use lexgen::{Generator, Options};
use rlex::Lexer;

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("cannot open file '{}': {}", path, err);
        std::process::exit(1)
    })
}

fn load(path: &str, options: Options) -> Generator {
    Generator::new(options)
        .load(&read_file(path))
        .and_then(Generator::compile)
        .unwrap_or_else(|err| {
            eprintln!("{}: {}", path, err);
            std::process::exit(1)
        })
}

fn print_automata(gen: &Generator, kind: &str) {
    for rule in gen.rules() {
        let regex = rlex::syntax::parse(rule.pattern()).unwrap_or_else(|err| {
            eprintln!("rule '{}': {}", rule.name(), err);
            std::process::exit(1)
        });
        let nfa = rlex::automata::builder::build(regex);
        let dot = match kind {
            "nfa" => nfa.debug_format(),
            "dfa" => nfa.determine().debug_format(),
            _ => unreachable!(),
        };
        match dot {
            Ok(dot) => println!("// {}\n{}", rule, dot),
            Err(err) => {
                eprintln!("rule '{}': {}", rule.name(), err);
                std::process::exit(1)
            }
        }
    }
}

fn main() {
    let spec_file = Arg::with_name("SPEC")
        .help("Token rule specification file")
        .required(true)
        .index(1);
    let matches = App::new("lexgen")
        .version(concat!(env!("CARGO_PKG_VERSION")))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .subcommand(SubCommand::with_name("generate")
            .about("Generate a scanner module from the specification")
            .arg(spec_file.clone())
            .arg(Arg::with_name("output-dir")
                .short("o")
                .long("output-dir")
                .help("Directory to write the scanner into")
                .value_name("DIR")
                .takes_value(true)
                .default_value("."))
            .arg(Arg::with_name("name")
                .short("n")
                .long("name")
                .help("File name of the scanner, without extension")
                .value_name("NAME")
                .takes_value(true)
                .default_value("lexer"))
            .arg(Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Print the parsed rules and the compiled tables"))
            .arg(Arg::with_name("dot")
                .long("dot")
                .help("Print the automata of every rule in Graphviz format")
                .value_name("AUTOMATON")
                .takes_value(true)
                .possible_values(&["nfa", "dfa"])))
        .subcommand(SubCommand::with_name("scan")
            .about("Scan a file with the rules of the specification")
            .arg(spec_file)
            .arg(Arg::with_name("INPUT")
                .help("File to scan")
                .required(true)
                .index(2)))
        .get_matches();
    if let Some(sub_matches) = matches.subcommand_matches("generate") {
        let path = sub_matches.value_of("SPEC").unwrap();
        let options = Options { verbose: sub_matches.is_present("verbose") };
        let gen = load(path, options);
        if let Some(kind) = sub_matches.value_of("dot") {
            print_automata(&gen, kind);
        }
        let dir = sub_matches.value_of("output-dir").unwrap();
        let name = sub_matches.value_of("name").unwrap();
        gen.write_to(dir, name).unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1)
        });
    } else if let Some(sub_matches) = matches.subcommand_matches("scan") {
        let gen = load(sub_matches.value_of("SPEC").unwrap(), Options::default());
        let input = read_file(sub_matches.value_of("INPUT").unwrap());
        let mut failed = false;
        for token in Lexer::new(gen.tables(), &input) {
            match token {
                Ok(token) => println!("{}", token),
                Err(err) => {
                    eprintln!("{}", err);
                    failed = true;
                }
            }
        }
        if failed { std::process::exit(1) }
    } else {
        eprintln!("{}", matches.usage());
        std::process::exit(1)
    }
}
