use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

/// One alternation, one named group per token class, tried in this order.
/// Horizontal whitespace and comments are consumed here and never surface.
static SCANNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\A(?:(?P<newline>\r?\n)",
        r"|(?P<space>[ \t]+)",
        r"|(?P<comment>#[^\n]*)",
        r"|(?P<special>[A-Z]+)",
        r"|(?P<rulename>[a-z_]+)",
        r"|(?P<literal>'[^'\n]*')",
        r"|(?P<colon>:)",
        r"|(?P<lparen>\()",
        r"|(?P<rparen>\))",
        r"|(?P<lbrack>\[)",
        r"|(?P<rbrack>\])",
        r"|(?P<plus>\+)",
        r"|(?P<star>\*)",
        r"|(?P<pipe>\|))",
    ))
    .unwrap()
});

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Newline,
    Special,
    RuleName,
    Literal,
    Colon,
    LParen,
    RParen,
    LBrack,
    RBrack,
    Plus,
    Star,
    Pipe,
    /// Synthesized by the parser before the first token is read.
    Start,
    /// Synthesized by the parser when the lexer is exhausted.
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Newline => "newline",
            TokenKind::Special => "special token name",
            TokenKind::RuleName => "rule name",
            TokenKind::Literal => "literal",
            TokenKind::Colon => "`:`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrack => "`[`",
            TokenKind::RBrack => "`]`",
            TokenKind::Plus => "`+`",
            TokenKind::Star => "`*`",
            TokenKind::Pipe => "`|`",
            TokenKind::Start => "start of input",
            TokenKind::EndOfInput => "end of input",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: usize,
}

/// Group names in the same order as the alternation above. Groups mapped to
/// `None` are recognized and dropped.
const GROUPS: [(&str, Option<TokenKind>); 14] = [
    ("newline", Some(TokenKind::Newline)),
    ("space", None),
    ("comment", None),
    ("special", Some(TokenKind::Special)),
    ("rulename", Some(TokenKind::RuleName)),
    ("literal", Some(TokenKind::Literal)),
    ("colon", Some(TokenKind::Colon)),
    ("lparen", Some(TokenKind::LParen)),
    ("rparen", Some(TokenKind::RParen)),
    ("lbrack", Some(TokenKind::LBrack)),
    ("rbrack", Some(TokenKind::RBrack)),
    ("plus", Some(TokenKind::Plus)),
    ("star", Some(TokenKind::Star)),
    ("pipe", Some(TokenKind::Pipe)),
];

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0 }
    }

    /// Byte offset of the next unconsumed character.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.src.len() {
            let caps = match SCANNER.captures(&self.src[self.pos..]) {
                Some(caps) => caps,
                None => return Some(Err(Error::Lex { pos: self.pos })),
            };

            let pos = self.pos;

            for (group, kind) in GROUPS {
                let m = match caps.name(group) {
                    Some(m) => m,
                    None => continue,
                };

                self.pos += m.end();

                match kind {
                    Some(kind) => {
                        return Some(Ok(Token {
                            kind,
                            text: m.as_str().to_owned(),
                            pos,
                        }))
                    }
                    // whitespace or comment, rescan from the new position
                    None => break,
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).map(|tok| tok.unwrap().kind).collect()
    }

    #[test]
    fn token_classes() {
        assert_eq!(
            kinds("rule: NAME 'x' ( ) [ ] + * |\n"),
            vec![
                TokenKind::RuleName,
                TokenKind::Colon,
                TokenKind::Special,
                TokenKind::Literal,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrack,
                TokenKind::RBrack,
                TokenKind::Plus,
                TokenKind::Star,
                TokenKind::Pipe,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn whitespace_and_comments_dropped() {
        assert_eq!(
            kinds("a # trailing words: ( [ *\nb"),
            vec![TokenKind::RuleName, TokenKind::Newline, TokenKind::RuleName]
        );
        assert_eq!(kinds("  \t  "), vec![]);
    }

    #[test]
    fn newline_is_not_plain_whitespace() {
        assert_eq!(
            kinds("a\n\nb"),
            vec![
                TokenKind::RuleName,
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::RuleName,
            ]
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let toks: Vec<Token> = Lexer::new("ab: CD").map(Result::unwrap).collect();

        assert_eq!(toks[0].pos, 0);
        assert_eq!(toks[1].pos, 2);
        assert_eq!(toks[2].pos, 4);
        assert_eq!(toks[2].text, "CD");
    }

    #[test]
    fn literal_keeps_quotes_in_token_text() {
        let toks: Vec<Token> = Lexer::new("'hi'").map(Result::unwrap).collect();

        assert_eq!(toks[0].kind, TokenKind::Literal);
        assert_eq!(toks[0].text, "'hi'");
    }

    #[test]
    fn bad_character_reports_offset() {
        let mut lexer = Lexer::new("ab @");

        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::RuleName);
        assert_eq!(lexer.next().unwrap(), Err(Error::Lex { pos: 3 }));
    }
}
