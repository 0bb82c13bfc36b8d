use crate::ast::{Definition, Grammar, Pattern};
use crate::error::Error;

/// Anything the walker can be pointed at. A bare slice of patterns walks its
/// items in order, with no hooks of its own.
#[derive(Copy, Clone)]
pub enum Node<'a> {
    Grammar(&'a Grammar),
    Def(&'a Definition),
    Pattern(&'a Pattern),
    List(&'a [Pattern]),
}

impl<'a> From<&'a Grammar> for Node<'a> {
    fn from(grammar: &'a Grammar) -> Self {
        Node::Grammar(grammar)
    }
}

impl<'a> From<&'a Definition> for Node<'a> {
    fn from(def: &'a Definition) -> Self {
        Node::Def(def)
    }
}

impl<'a> From<&'a Pattern> for Node<'a> {
    fn from(pattern: &'a Pattern) -> Self {
        Node::Pattern(pattern)
    }
}

impl<'a> From<&'a [Pattern]> for Node<'a> {
    fn from(list: &'a [Pattern]) -> Self {
        Node::List(list)
    }
}

impl<'a> From<&'a Vec<Pattern>> for Node<'a> {
    fn from(list: &'a Vec<Pattern>) -> Self {
        Node::List(list)
    }
}

/// What a full-control `walk_*` method decided. `Auto` hands the node back
/// to the engine for structural traversal; `Done` means the method took care
/// of it, children included, and the enter/leave hooks must not run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Auto,
    Done,
}

/// A traversal participant. Every method has a no-op default; implement the
/// `enter_*`/`leave_*` hooks to observe nodes structurally, or a `walk_*`
/// method to take over traversal for that kind entirely. When a `walk_*`
/// method returns `Done`, the hooks for that node never run. Overrides
/// continue into children by calling [`walk`] themselves.
pub trait Visitor: Sized {
    fn walk_grammar(&mut self, _grammar: &Grammar) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_def(&mut self, _def: &Definition) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_tok(&mut self, _text: &str) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_lit(&mut self, _text: &str) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_ref(&mut self, _text: &str) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_seq(&mut self, _items: &[Pattern]) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_alt(&mut self, _alternatives: &[Pattern]) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_opt(&mut self, _inner: &Pattern) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_rep(&mut self, _inner: &Pattern) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn walk_orp(&mut self, _inner: &Pattern) -> Result<Control, Error> {
        Ok(Control::Auto)
    }

    fn enter_grammar(&mut self, _grammar: &Grammar) -> Result<(), Error> {
        Ok(())
    }

    fn leave_grammar(&mut self, _grammar: &Grammar) -> Result<(), Error> {
        Ok(())
    }

    fn enter_def(&mut self, _def: &Definition) -> Result<(), Error> {
        Ok(())
    }

    fn leave_def(&mut self, _def: &Definition) -> Result<(), Error> {
        Ok(())
    }

    fn enter_tok(&mut self, _text: &str) -> Result<(), Error> {
        Ok(())
    }

    fn leave_tok(&mut self, _text: &str) -> Result<(), Error> {
        Ok(())
    }

    fn enter_lit(&mut self, _text: &str) -> Result<(), Error> {
        Ok(())
    }

    fn leave_lit(&mut self, _text: &str) -> Result<(), Error> {
        Ok(())
    }

    fn enter_ref(&mut self, _text: &str) -> Result<(), Error> {
        Ok(())
    }

    fn leave_ref(&mut self, _text: &str) -> Result<(), Error> {
        Ok(())
    }

    fn enter_seq(&mut self, _items: &[Pattern]) -> Result<(), Error> {
        Ok(())
    }

    fn leave_seq(&mut self, _items: &[Pattern]) -> Result<(), Error> {
        Ok(())
    }

    fn enter_alt(&mut self, _alternatives: &[Pattern]) -> Result<(), Error> {
        Ok(())
    }

    fn leave_alt(&mut self, _alternatives: &[Pattern]) -> Result<(), Error> {
        Ok(())
    }

    fn enter_opt(&mut self, _inner: &Pattern) -> Result<(), Error> {
        Ok(())
    }

    fn leave_opt(&mut self, _inner: &Pattern) -> Result<(), Error> {
        Ok(())
    }

    fn enter_rep(&mut self, _inner: &Pattern) -> Result<(), Error> {
        Ok(())
    }

    fn leave_rep(&mut self, _inner: &Pattern) -> Result<(), Error> {
        Ok(())
    }

    fn enter_orp(&mut self, _inner: &Pattern) -> Result<(), Error> {
        Ok(())
    }

    fn leave_orp(&mut self, _inner: &Pattern) -> Result<(), Error> {
        Ok(())
    }
}

/// Walk `node`, dispatching on its kind: the visitor's full-control method
/// runs first, and only if it returns `Auto` does the engine run the enter
/// hook, the children in their fixed order, and the leave hook.
pub fn walk<'a, V, N>(visitor: &mut V, node: N) -> Result<(), Error>
where
    V: Visitor,
    N: Into<Node<'a>>,
{
    match node.into() {
        Node::Grammar(grammar) => {
            if visitor.walk_grammar(grammar)? == Control::Done {
                return Ok(());
            }

            visitor.enter_grammar(grammar)?;
            for def in &grammar.definitions {
                walk(visitor, def)?;
            }
            visitor.leave_grammar(grammar)
        }
        Node::Def(def) => {
            if visitor.walk_def(def)? == Control::Done {
                return Ok(());
            }

            visitor.enter_def(def)?;
            walk(visitor, &def.pattern)?;
            visitor.leave_def(def)
        }
        Node::List(items) => {
            for item in items {
                walk(visitor, item)?;
            }
            Ok(())
        }
        Node::Pattern(pattern) => match pattern {
            Pattern::Tok(text) => {
                if visitor.walk_tok(text)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_tok(text)?;
                visitor.leave_tok(text)
            }
            Pattern::Lit(text) => {
                if visitor.walk_lit(text)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_lit(text)?;
                visitor.leave_lit(text)
            }
            Pattern::Ref(text) => {
                if visitor.walk_ref(text)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_ref(text)?;
                visitor.leave_ref(text)
            }
            Pattern::Seq(items) => {
                if visitor.walk_seq(items)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_seq(items)?;
                for item in items {
                    walk(visitor, item)?;
                }
                visitor.leave_seq(items)
            }
            Pattern::Alt(alternatives) => {
                if visitor.walk_alt(alternatives)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_alt(alternatives)?;
                for alternative in alternatives {
                    walk(visitor, alternative)?;
                }
                visitor.leave_alt(alternatives)
            }
            Pattern::Opt(inner) => {
                if visitor.walk_opt(inner)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_opt(inner)?;
                walk(visitor, inner.as_ref())?;
                visitor.leave_opt(inner)
            }
            Pattern::Rep(inner) => {
                if visitor.walk_rep(inner)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_rep(inner)?;
                walk(visitor, inner.as_ref())?;
                visitor.leave_rep(inner)
            }
            Pattern::Orp(inner) => {
                if visitor.walk_orp(inner)? == Control::Done {
                    return Ok(());
                }

                visitor.enter_orp(inner)?;
                walk(visitor, inner.as_ref())?;
                visitor.leave_orp(inner)
            }
        },
    }
}
