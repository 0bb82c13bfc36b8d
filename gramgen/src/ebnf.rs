//! Regenerates grammar source from a parsed tree. Feeding the output back
//! through the parser reproduces the tree exactly, which is the primary
//! self-check for the lexer and parser.

use std::mem;

use crate::ast::{Definition, Grammar, Pattern};
use crate::emit::{Backend, Chunk, Emitter};
use crate::error::Error;
use crate::walk::{walk, Control, Visitor};

pub fn to_ebnf(grammar: &Grammar) -> Result<String, Error> {
    let mut ebnf = EbnfEmitter {
        emitter: Emitter::new(),
        bare_seq: false,
        bare_alt: false,
    };

    walk(&mut ebnf, grammar)?;

    Ok(ebnf.emitter.into_output())
}

/// A sequence or alternation prints parenthesized exactly where reparsing
/// would rebuild it in place as a group: nested inside another sequence, or
/// as a postfix operand. At the top of a rule and directly inside `[...]`
/// the flags below let it print bare.
struct EbnfEmitter {
    emitter: Emitter,
    bare_seq: bool,
    bare_alt: bool,
}

impl EbnfEmitter {
    /// The pattern under a rule name or inside brackets prints without
    /// enclosing parentheses.
    fn walk_bare(&mut self, pattern: &Pattern) -> Result<(), Error> {
        match pattern {
            Pattern::Alt(_) => self.bare_alt = true,
            Pattern::Seq(_) => self.bare_seq = true,
            _ => (),
        }

        walk(self, pattern)
    }
}

impl Visitor for EbnfEmitter {
    fn walk_def(&mut self, def: &Definition) -> Result<Control, Error> {
        self.put(Chunk::Text(&def.name))?;
        self.put(Chunk::Text(": "))?;
        self.walk_bare(&def.pattern)?;
        self.put(Chunk::Text("\n"))?;

        Ok(Control::Done)
    }

    fn walk_seq(&mut self, items: &[Pattern]) -> Result<Control, Error> {
        let bare = mem::take(&mut self.bare_seq);

        if !bare {
            self.put(Chunk::Text("("))?;
        }
        self.between(items, " ")?;
        if !bare {
            self.put(Chunk::Text(")"))?;
        }

        Ok(Control::Done)
    }

    fn walk_alt(&mut self, alternatives: &[Pattern]) -> Result<Control, Error> {
        let bare = mem::take(&mut self.bare_alt);

        if !bare {
            self.put(Chunk::Text("("))?;
        }
        for (no, alternative) in alternatives.iter().enumerate() {
            if no > 0 {
                self.put(Chunk::Text(" | "))?;
            }
            // alternatives are sequences and always print bare
            self.bare_seq = true;
            walk(self, alternative)?;
        }
        if !bare {
            self.put(Chunk::Text(")"))?;
        }

        Ok(Control::Done)
    }

    fn walk_opt(&mut self, inner: &Pattern) -> Result<Control, Error> {
        self.put(Chunk::Text("["))?;
        self.walk_bare(inner)?;
        self.put(Chunk::Text("]"))?;

        Ok(Control::Done)
    }

    fn walk_rep(&mut self, inner: &Pattern) -> Result<Control, Error> {
        walk(self, inner)?;
        self.put(Chunk::Text("+"))?;

        Ok(Control::Done)
    }

    fn walk_orp(&mut self, inner: &Pattern) -> Result<Control, Error> {
        walk(self, inner)?;
        self.put(Chunk::Text("*"))?;

        Ok(Control::Done)
    }

    fn enter_tok(&mut self, text: &str) -> Result<(), Error> {
        self.put(Chunk::Text(text))
    }

    fn enter_lit(&mut self, text: &str) -> Result<(), Error> {
        self.put(Chunk::Text("'"))?;
        self.put(Chunk::Text(text))?;
        self.put(Chunk::Text("'"))
    }

    fn enter_ref(&mut self, text: &str) -> Result<(), Error> {
        self.put(Chunk::Text(text))
    }
}

impl Backend for EbnfEmitter {
    fn emitter(&mut self) -> &mut Emitter {
        &mut self.emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn emitted(src: &str) -> String {
        to_ebnf(&parse(src).unwrap()).unwrap()
    }

    fn assert_fixpoint(src: &str) {
        let grammar = parse(src).unwrap();
        let regenerated = to_ebnf(&grammar).unwrap();

        assert_eq!(parse(&regenerated).unwrap(), grammar, "from {:?}", regenerated);
    }

    #[test]
    fn literal_and_special() {
        assert_eq!(emitted("greeting: 'hi' NAME"), "greeting: 'hi' NAME\n");
    }

    #[test]
    fn top_level_alternation_prints_bare() {
        assert_eq!(emitted("choice: 'a' | 'b'\n"), "choice: 'a' | 'b'\n");
    }

    #[test]
    fn nested_alternation_prints_parenthesized() {
        assert_eq!(emitted("r: (a | b) c\n"), "r: (a | b) c\n");
    }

    #[test]
    fn optional_prints_brackets() {
        assert_eq!(emitted("opt_rule: ['x'] 'y'\n"), "opt_rule: ['x'] 'y'\n");
    }

    #[test]
    fn postfix_operators_print_after_their_operand() {
        assert_eq!(emitted("r: a* b+\n"), "r: a* b+\n");
        assert_eq!(emitted("r: (a b)* c\n"), "r: (a b)* c\n");
    }

    #[test]
    fn alternation_inside_brackets_prints_bare() {
        assert_eq!(emitted("r: [a | b] c\n"), "r: [a | b] c\n");
    }

    #[test]
    fn rules_print_one_per_line() {
        assert_eq!(emitted("a: b\nb: 'x'\n"), "a: b\nb: 'x'\n");
    }

    #[test]
    fn reparsing_the_output_reproduces_the_tree() {
        assert_fixpoint("greeting: 'hi' NAME\n");
        assert_fixpoint("choice: 'a' | 'b' | 'c'\n");
        assert_fixpoint("r: (a | b c)* [d | e] f+ NEWLINE\n");
        assert_fixpoint("r: ((a))\n");
        assert_fixpoint("r: [x [y]] (p | (q | r) s)+\n");
        assert_fixpoint("stmt: 'if' expr ':' NEWLINE INDENT stmt+ DEDENT\nexpr: NAME | NUMBER\n");
    }
}
