use crate::ast::Pattern;
use crate::error::Error;
use crate::walk::{walk, Visitor};

/// One unit of emission. Indentation changes are part of the stream itself
/// rather than out-of-band calls, so a backend's output is a single closed
/// sequence of chunks.
#[derive(Copy, Clone, Debug)]
pub enum Chunk<'a> {
    Text(&'a str),
    Indent,
    Dedent,
}

/// Indentation-aware text sink. `Indent`/`Dedent` adjust the level and start
/// a fresh indented line; a `'\n'` embedded in `Text` starts a fresh line at
/// the current level. Dedenting below the left margin fails before anything
/// is written.
pub struct Emitter {
    indent: usize,
    output: String,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            indent: 0,
            output: String::new(),
        }
    }

    pub fn emit(&mut self, chunk: Chunk) -> Result<(), Error> {
        match chunk {
            Chunk::Text(text) => {
                for ch in text.chars() {
                    if ch == '\n' {
                        self.fresh_line();
                    } else {
                        self.output.push(ch);
                    }
                }
            }
            Chunk::Indent => {
                self.indent += 1;
                self.fresh_line();
            }
            Chunk::Dedent => {
                if self.indent == 0 {
                    return Err(Error::Dedent);
                }
                self.indent -= 1;
                self.fresh_line();
            }
        }

        Ok(())
    }

    fn fresh_line(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

/// A visitor that writes through an [`Emitter`]. Visiting emits into the
/// sink instead of returning strings, so joining with a separator cannot use
/// the usual iterator idioms; `between` does that join over walks.
pub trait Backend: Visitor {
    fn emitter(&mut self) -> &mut Emitter;

    fn put(&mut self, chunk: Chunk) -> Result<(), Error> {
        self.emitter().emit(chunk)
    }

    /// Walk each node in order, emitting `sep` between consecutive walks.
    fn between(&mut self, items: &[Pattern], sep: &str) -> Result<(), Error> {
        for (no, item) in items.iter().enumerate() {
            if no > 0 {
                self.emitter().emit(Chunk::Text(sep))?;
            }
            walk(self, item)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_indentation() {
        let mut emitter = Emitter::new();

        emitter.emit(Chunk::Text("a {")).unwrap();
        emitter.emit(Chunk::Indent).unwrap();
        emitter.emit(Chunk::Text("b")).unwrap();
        emitter.emit(Chunk::Dedent).unwrap();
        emitter.emit(Chunk::Text("}")).unwrap();

        assert_eq!(emitter.into_output(), "a {\n    b\n}");
    }

    #[test]
    fn dedent_below_the_margin_fails_before_writing() {
        let mut emitter = Emitter::new();

        emitter.emit(Chunk::Text("x")).unwrap();

        assert_eq!(emitter.emit(Chunk::Dedent), Err(Error::Dedent));
        assert_eq!(emitter.into_output(), "x");
    }

    #[test]
    fn embedded_newlines_keep_the_current_level() {
        let mut emitter = Emitter::new();

        emitter.emit(Chunk::Indent).unwrap();
        emitter.emit(Chunk::Text("a\nb")).unwrap();

        assert_eq!(emitter.into_output(), "\n    a\n    b");
    }

    #[test]
    fn nested_levels_unwind_one_at_a_time() {
        let mut emitter = Emitter::new();

        emitter.emit(Chunk::Indent).unwrap();
        emitter.emit(Chunk::Indent).unwrap();
        emitter.emit(Chunk::Text("deep")).unwrap();
        emitter.emit(Chunk::Dedent).unwrap();
        emitter.emit(Chunk::Dedent).unwrap();

        assert_eq!(emitter.into_output(), "\n    \n        deep\n    \n");
    }

    #[test]
    fn between_separates_consecutive_walks() {
        struct Leaves {
            emitter: Emitter,
        }

        impl Visitor for Leaves {
            fn enter_ref(&mut self, text: &str) -> Result<(), Error> {
                self.put(Chunk::Text(text))
            }
        }

        impl Backend for Leaves {
            fn emitter(&mut self) -> &mut Emitter {
                &mut self.emitter
            }
        }

        let items = vec![
            Pattern::Ref("a".to_owned()),
            Pattern::Ref("b".to_owned()),
            Pattern::Ref("c".to_owned()),
        ];
        let mut leaves = Leaves {
            emitter: Emitter::new(),
        };

        leaves.between(&items, ", ").unwrap();

        assert_eq!(leaves.emitter.into_output(), "a, b, c");
    }
}
