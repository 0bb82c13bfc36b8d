use crate::lexer::TokenKind;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("bad token at position {pos}")]
    Lex { pos: usize },
    #[error("expected {expected}, found {found} at position {pos}")]
    Parse {
        expected: TokenKind,
        found: TokenKind,
        pos: usize,
    },
    #[error("`{op}` has nothing to repeat at position {pos}")]
    DanglingPostfix { op: char, pos: usize },
    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),
    #[error("reference to unknown rule `{0}`")]
    UnknownRule(String),
    #[error("unknown special token `{0}`")]
    UnknownSpecial(String),
    #[error("grammar defines no rules")]
    EmptyGrammar,
    #[error("dedent below the left margin")]
    Dedent,
}
