use std::collections::HashSet;

use crate::ast::{Grammar, Pattern};
use crate::error::Error;

/// Verify that every rule reference resolves to a definition. Rules that are
/// never referenced are reported on stderr but do not fail the grammar; the
/// first rule is the start rule and is exempt.
pub fn check_grammar(grammar: &Grammar) -> Result<(), Error> {
    let mut used = HashSet::new();

    for def in &grammar.definitions {
        check_pattern(&def.pattern, grammar, &mut used)?;
    }

    for (no, def) in grammar.definitions.iter().enumerate() {
        if no != 0 && !used.contains(&no) {
            eprintln!("rule {} is not used anywhere", def.name);
        }
    }

    Ok(())
}

// just check for references for now
fn check_pattern(
    pattern: &Pattern,
    grammar: &Grammar,
    used: &mut HashSet<usize>,
) -> Result<(), Error> {
    match pattern {
        Pattern::Ref(name) => match grammar.lookup.get(name) {
            Some(no) => {
                used.insert(*no);
                Ok(())
            }
            None => Err(Error::UnknownRule(name.clone())),
        },
        Pattern::Seq(list) | Pattern::Alt(list) => {
            for pattern in list {
                check_pattern(pattern, grammar, used)?;
            }
            Ok(())
        }
        Pattern::Opt(inner) | Pattern::Rep(inner) | Pattern::Orp(inner) => {
            check_pattern(inner, grammar, used)
        }
        Pattern::Tok(_) | Pattern::Lit(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn resolved_references_pass() {
        let grammar = parse("a: b+ [b | 'x']\nb: NAME\n").unwrap();

        assert_eq!(check_grammar(&grammar), Ok(()));
    }

    #[test]
    fn unknown_reference_fails() {
        let grammar = parse("a: missing\n").unwrap();

        assert_eq!(
            check_grammar(&grammar),
            Err(Error::UnknownRule("missing".to_owned()))
        );
    }

    #[test]
    fn unknown_reference_inside_a_group_fails() {
        let grammar = parse("a: ('x' | missing)*\n").unwrap();

        assert_eq!(
            check_grammar(&grammar),
            Err(Error::UnknownRule("missing".to_owned()))
        );
    }
}
