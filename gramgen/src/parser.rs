use std::collections::BTreeMap;
use std::mem;

use crate::ast::{Definition, Grammar, Pattern};
use crate::error::Error;
use crate::lexer::{Lexer, Token, TokenKind};

pub fn parse(src: &str) -> Result<Grammar, Error> {
    Parser::new(src).grammar()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(src),
            current: Token {
                kind: TokenKind::Start,
                text: String::new(),
                pos: 0,
            },
        }
    }

    fn advance(&mut self) -> Result<(), Error> {
        self.current = match self.lexer.next() {
            Some(token) => token?,
            None => Token {
                kind: TokenKind::EndOfInput,
                text: String::new(),
                pos: self.lexer.offset(),
            },
        };

        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.current.kind != kind {
            return Err(Error::Parse {
                expected: kind,
                found: self.current.kind,
                pos: self.current.pos,
            });
        }

        let token = self.current.clone();
        self.advance()?;

        Ok(token)
    }

    // Consume the current token and hand back its text.
    fn take_text(&mut self) -> Result<String, Error> {
        let text = mem::take(&mut self.current.text);
        self.advance()?;

        Ok(text)
    }

    fn grammar(&mut self) -> Result<Grammar, Error> {
        self.advance()?;

        let mut grammar = Grammar {
            lookup: BTreeMap::new(),
            definitions: Vec::new(),
        };

        loop {
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::EndOfInput => break,
                _ => {
                    let def = self.definition()?;

                    if grammar.lookup.contains_key(&def.name) {
                        return Err(Error::DuplicateRule(def.name));
                    }

                    grammar
                        .lookup
                        .insert(def.name.clone(), grammar.definitions.len());

                    grammar.definitions.push(def);
                }
            }
        }

        Ok(grammar)
    }

    fn definition(&mut self) -> Result<Definition, Error> {
        let name = self.expect(TokenKind::RuleName)?.text;
        self.expect(TokenKind::Colon)?;
        let pattern = self.pattern(TokenKind::Newline)?;

        Ok(Definition { name, pattern })
    }

    /// Parse a pattern up to (and including) `terminator`. Alternation
    /// accumulates completed branches locally; `|` closes the branch in
    /// progress and opens a fresh one at the same depth.
    fn pattern(&mut self, terminator: TokenKind) -> Result<Pattern, Error> {
        let mut branches: Vec<Vec<Pattern>> = Vec::new();
        let mut branch: Vec<Pattern> = Vec::new();

        loop {
            if self.current.kind == terminator {
                self.advance()?;
                break;
            }

            match self.current.kind {
                // a source not ending in a newline still terminates its last rule
                TokenKind::EndOfInput if terminator == TokenKind::Newline => break,
                TokenKind::Special => branch.push(Pattern::Tok(self.take_text()?)),
                TokenKind::RuleName => branch.push(Pattern::Ref(self.take_text()?)),
                TokenKind::Literal => {
                    let text = self.take_text()?;
                    branch.push(Pattern::Lit(text[1..text.len() - 1].to_owned()));
                }
                TokenKind::LParen => {
                    self.advance()?;
                    let group = self.pattern(TokenKind::RParen)?;
                    branch.push(group);
                }
                TokenKind::LBrack => {
                    self.advance()?;
                    let group = self.pattern(TokenKind::RBrack)?;
                    branch.push(Pattern::Opt(Box::new(group)));
                }
                // `*` and `+` wrap the node emitted immediately before them
                TokenKind::Star => {
                    let inner = self.pop_operand(&mut branch, '*')?;
                    branch.push(Pattern::Orp(Box::new(inner)));
                    self.advance()?;
                }
                TokenKind::Plus => {
                    let inner = self.pop_operand(&mut branch, '+')?;
                    branch.push(Pattern::Rep(Box::new(inner)));
                    self.advance()?;
                }
                TokenKind::Pipe => {
                    branches.push(mem::take(&mut branch));
                    self.advance()?;
                }
                found => {
                    return Err(Error::Parse {
                        expected: terminator,
                        found,
                        pos: self.current.pos,
                    })
                }
            }
        }

        if branches.is_empty() {
            Ok(Pattern::Seq(branch))
        } else {
            branches.push(branch);
            Ok(Pattern::Alt(
                branches.into_iter().map(Pattern::Seq).collect(),
            ))
        }
    }

    fn pop_operand(&self, branch: &mut Vec<Pattern>, op: char) -> Result<Pattern, Error> {
        branch.pop().ok_or(Error::DanglingPostfix {
            op,
            pos: self.current.pos,
        })
    }
}
