use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    pub lookup: BTreeMap<String, usize>,
    pub definitions: Vec<Definition>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub pattern: Pattern,
}

/// A rule body. `Alt` always holds at least two alternatives, each of them a
/// `Seq`; a pattern with a single alternative is a bare `Seq`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    Tok(String),
    Lit(String),
    Ref(String),
    Seq(Vec<Pattern>),
    Alt(Vec<Pattern>),
    Opt(Box<Pattern>),
    Rep(Box<Pattern>),
    Orp(Box<Pattern>),
}
