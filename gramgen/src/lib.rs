use std::ffi::OsStr;
use std::fs;
use std::path::Path;

pub mod ast;
pub mod cache;
mod check;
pub mod ebnf;
pub mod emit;
mod error;
pub mod lexer;
pub mod parser;
mod utils;
pub mod walk;

pub use cache::GrammarCache;
pub use error::Error;

use ast::{Definition, Grammar, Pattern};
use emit::{Backend, Chunk, Emitter};
use utils::escape_string;
use walk::{walk, Control, Visitor};

/// Generate a random-program generator for the grammar described in source.
/// The result is a rust module as String: a `Gen` struct with one method per
/// rule, whose `generate()` runs the first rule and returns the synthesized
/// program.
pub fn build_generator(source: &str, modname: &str) -> Result<String, Error> {
    let grammar = parser::parse(source)?;

    if grammar.definitions.is_empty() {
        return Err(Error::EmptyGrammar);
    }

    check::check_grammar(&grammar)?;

    let mut gen = Generator::new(modname);

    walk(&mut gen, &grammar)?;

    Ok(gen.emitter.into_output())
}

struct Generator {
    emitter: Emitter,
    modname: String,
}

impl Generator {
    fn new(modname: &str) -> Self {
        Generator {
            emitter: Emitter::new(),
            modname: modname.to_owned(),
        }
    }
}

impl Visitor for Generator {
    fn walk_grammar(&mut self, grammar: &Grammar) -> Result<Control, Error> {
        let mut prelude = format!(
            "// ---- WARNING! this file is generated! ----\nmod {} {{",
            self.modname
        );

        prelude.push_str(
            r#"
#![allow(dead_code, clippy::all)]
use rand::Rng;

pub struct Gen {
    out: String,
    depth: usize,
    rng: rand::rngs::ThreadRng,
}

impl Gen {
    pub fn new() -> Self {
        Gen {
            out: String::new(),
            depth: 0,
            rng: rand::rng(),
        }
    }

    /// Run the start rule and hand back the synthesized program.
    pub fn generate(mut self) -> String {
"#,
        );

        prelude.push_str(&format!(
            "        self.rule_{}();\n",
            grammar.definitions[0].name
        ));

        prelude.push_str(
            r#"        self.out
    }

    fn emit(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push(' ');
    }

    fn word(&mut self) -> String {
        let len = self.rng.random_range(1..=6);
        (0..len)
            .map(|_| char::from(b'a' + self.rng.random_range(0..26)))
            .collect()
    }

    fn name(&mut self) {
        let word = self.word();
        self.emit(&word);
    }

    fn number(&mut self) {
        let number = self.rng.random_range(0..1000);
        self.emit(&number.to_string());
    }

    fn string(&mut self) {
        let word = self.word();
        self.emit(&format!("\"{}\"", word));
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str("    ");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }"#,
        );

        self.put(Chunk::Text(&prelude))?;
        self.put(Chunk::Indent)?;

        for def in &grammar.definitions {
            self.put(Chunk::Text("\n"))?;
            walk(self, def)?;
        }

        self.put(Chunk::Dedent)?;
        self.put(Chunk::Text("}\n}\n"))?;

        Ok(Control::Done)
    }

    fn walk_def(&mut self, def: &Definition) -> Result<Control, Error> {
        self.put(Chunk::Text(&format!("fn rule_{}(&mut self) {{", def.name)))?;
        self.put(Chunk::Indent)?;
        walk(self, &def.pattern)?;
        self.put(Chunk::Dedent)?;
        self.put(Chunk::Text("}"))?;

        Ok(Control::Done)
    }

    fn walk_seq(&mut self, items: &[Pattern]) -> Result<Control, Error> {
        self.between(items, "\n")?;

        Ok(Control::Done)
    }

    // one alternative wins per invocation, each equally likely
    fn walk_alt(&mut self, alternatives: &[Pattern]) -> Result<Control, Error> {
        self.put(Chunk::Text(&format!(
            "match self.rng.random_range(0..{}) {{",
            alternatives.len()
        )))?;
        self.put(Chunk::Indent)?;

        for (no, alternative) in alternatives.iter().enumerate() {
            if no > 0 {
                self.put(Chunk::Text("\n"))?;
            }

            if no + 1 == alternatives.len() {
                self.put(Chunk::Text("_ => {"))?;
            } else {
                self.put(Chunk::Text(&format!("{} => {{", no)))?;
            }

            self.put(Chunk::Indent)?;
            walk(self, alternative)?;
            self.put(Chunk::Dedent)?;
            self.put(Chunk::Text("}"))?;
        }

        self.put(Chunk::Dedent)?;
        self.put(Chunk::Text("}"))?;

        Ok(Control::Done)
    }

    fn walk_opt(&mut self, inner: &Pattern) -> Result<Control, Error> {
        self.put(Chunk::Text("if self.rng.random_bool(0.5) {"))?;
        self.put(Chunk::Indent)?;
        walk(self, inner)?;
        self.put(Chunk::Dedent)?;
        self.put(Chunk::Text("}"))?;

        Ok(Control::Done)
    }

    fn walk_rep(&mut self, inner: &Pattern) -> Result<Control, Error> {
        self.put(Chunk::Text("for _ in 0..self.rng.random_range(1..=3) {"))?;
        self.put(Chunk::Indent)?;
        walk(self, inner)?;
        self.put(Chunk::Dedent)?;
        self.put(Chunk::Text("}"))?;

        Ok(Control::Done)
    }

    fn walk_orp(&mut self, inner: &Pattern) -> Result<Control, Error> {
        self.put(Chunk::Text("for _ in 0..self.rng.random_range(0..=2) {"))?;
        self.put(Chunk::Indent)?;
        walk(self, inner)?;
        self.put(Chunk::Dedent)?;
        self.put(Chunk::Text("}"))?;

        Ok(Control::Done)
    }

    fn enter_tok(&mut self, text: &str) -> Result<(), Error> {
        match text {
            "NAME" => self.put(Chunk::Text("self.name();")),
            "NUMBER" => self.put(Chunk::Text("self.number();")),
            "STRING" => self.put(Chunk::Text("self.string();")),
            "NEWLINE" => self.put(Chunk::Text("self.newline();")),
            "INDENT" => self.put(Chunk::Text("self.indent();")),
            "DEDENT" => self.put(Chunk::Text("self.dedent();")),
            "ENDMARKER" => Ok(()),
            _ => Err(Error::UnknownSpecial(text.to_owned())),
        }
    }

    fn enter_lit(&mut self, text: &str) -> Result<(), Error> {
        self.put(Chunk::Text(&format!(
            "self.emit(\"{}\");",
            escape_string(text)
        )))
    }

    fn enter_ref(&mut self, text: &str) -> Result<(), Error> {
        self.put(Chunk::Text(&format!("self.rule_{}();", text)))
    }
}

impl Backend for Generator {
    fn emitter(&mut self) -> &mut Emitter {
        &mut self.emitter
    }
}

/// This function is supposed to be called from a crate build.rs. You pass in
/// the directory where your .gram files reside ("src/" for example), and for
/// each of those, an .rs file with the generated module will be created in
/// the out directory. You generally want this to be in cargo's OUT_DIR.
pub fn process_files(dir: &Path, out: &Path) {
    for entry in fs::read_dir(dir).expect("cannot read directory") {
        let entry = entry.expect("cannot read file");
        let path = entry.path();
        if path.is_dir() {
            process_files(&path, out);
        } else if path.is_file() && path.extension() == Some(OsStr::new("gram")) {
            let src = fs::read_to_string(&path).expect("failed to read input");

            let modname = path.file_stem().unwrap().to_str().unwrap();

            let res = match build_generator(&src, modname) {
                Ok(res) => res,
                Err(err) => panic!("{}: {}", path.display(), err),
            };

            let new_path = out.join(path.with_extension("rs").file_name().unwrap());

            fs::write(new_path, res).expect("failed to write generated module")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_method_per_rule() {
        let out = build_generator("greeting: 'hi' NAME\n", "hello").unwrap();

        assert!(out.contains("mod hello {"));
        assert!(out.contains("fn rule_greeting(&mut self) {"));
        assert!(out.contains("self.emit(\"hi\");"));
        assert!(out.contains("self.name();"));
    }

    #[test]
    fn generate_runs_the_first_rule() {
        let out = build_generator("first: 'a'\nsecond: first\n", "m").unwrap();

        assert!(out.contains("self.rule_first();\n"));
        assert!(out.contains("fn rule_second(&mut self) {"));
    }

    #[test]
    fn alternation_picks_one_branch_at_random() {
        let out = build_generator("choice: 'a' | 'b' | 'c'\n", "m").unwrap();

        assert!(out.contains("match self.rng.random_range(0..3) {"));
        assert!(out.contains("0 => {"));
        assert!(out.contains("1 => {"));
        assert!(out.contains("_ => {"));
        assert!(out.contains("self.emit(\"c\");"));
    }

    #[test]
    fn optional_is_a_coin_flip() {
        let out = build_generator("r: ['x'] 'y'\n", "m").unwrap();

        assert!(out.contains("if self.rng.random_bool(0.5) {"));
    }

    #[test]
    fn repetition_runs_at_least_once() {
        let out = build_generator("r: 'x'+\n", "m").unwrap();

        assert!(out.contains("for _ in 0..self.rng.random_range(1..=3) {"));
    }

    #[test]
    fn optional_repetition_may_run_zero_times() {
        let out = build_generator("r: 'x'*\n", "m").unwrap();

        assert!(out.contains("for _ in 0..self.rng.random_range(0..=2) {"));
    }

    #[test]
    fn structural_tokens_drive_the_nesting_level() {
        let out = build_generator("r: NEWLINE INDENT NAME DEDENT ENDMARKER\n", "m").unwrap();

        assert!(out.contains("self.newline();"));
        assert!(out.contains("self.indent();"));
        assert!(out.contains("self.dedent();"));
    }

    #[test]
    fn literal_text_is_escaped() {
        let out = build_generator(r"r: '\'", "m").unwrap();

        assert!(out.contains(r#"self.emit("\\");"#));
    }

    #[test]
    fn unknown_special_token_is_rejected() {
        assert_eq!(
            build_generator("r: BOGUS\n", "m"),
            Err(Error::UnknownSpecial("BOGUS".to_owned()))
        );
    }

    #[test]
    fn unknown_reference_is_rejected() {
        assert_eq!(
            build_generator("r: missing\n", "m"),
            Err(Error::UnknownRule("missing".to_owned()))
        );
    }

    #[test]
    fn empty_grammar_is_rejected() {
        assert_eq!(build_generator("\n", "m"), Err(Error::EmptyGrammar));
    }
}
