//! Cuts script text into classified [`Token`]s.
//!
//! The scanner is an [`Iterator`] and yields one token per call. It stops
//! after the first lexical error, since everything past that point would be
//! guesswork.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::parse::ParseError;
use crate::report::{warn, ErrorKey};
use crate::token::{Loc, Token, TokenKind};

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '?' | '>' | '<')
}

/// Every operator the scanner will merge characters into. The single `!` and
/// `?` are included so that merging can pass through them on the way to `!=`
/// and `?=`; on their own they fail classification.
fn is_operator_text(s: &str) -> bool {
    matches!(s, "=" | "==" | "!" | "!=" | "?" | "?=" | ">" | ">=" | "<" | "<=")
}

/// A character that ends whatever lexeme came before it.
fn is_boundary(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, '{' | '}' | '#' | '"' | '@') || is_operator_char(c)
}

#[derive(Debug)]
pub struct Scanner<'a> {
    iter: Peekable<CharIndices<'a>>,
    /// Location of the character that [`Scanner::peek_char`] would return.
    loc: Loc,
    brace_depth: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, mut loc: Loc) -> Self {
        if loc.line == 0 {
            loc.line = 1;
            loc.column = 1;
        } else if loc.column == 0 {
            loc.column = 1;
        }
        Scanner { iter: text.char_indices().peekable(), loc, brace_depth: 0, failed: false }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.iter.peek().map(|&(_, c)| c)
    }

    fn consume(&mut self) {
        if let Some((_, c)) = self.iter.next() {
            if c == '\n' {
                self.loc.line += 1;
                self.loc.column = 1;
            } else {
                self.loc.column += 1;
            }
        }
    }

    fn classify(&mut self, lexeme: String, loc: Loc) -> Result<Token, ParseError> {
        let result = Token::classify(lexeme, loc);
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn fail(&mut self, err: ParseError) -> Result<Token, ParseError> {
        self.failed = true;
        Err(err)
    }

    /// Read a quoted string, quotes and all. The quotes stay in the lexeme so
    /// that the classifier can tell it apart from a bare word; newlines are
    /// allowed inside.
    fn scan_quoted(&mut self) -> Result<Token, ParseError> {
        let start = self.loc.clone();
        let mut lexeme = String::from('"');
        self.consume();
        loop {
            match self.peek_char() {
                None => return self.fail(ParseError::UnterminatedString { loc: start }),
                Some('"') => {
                    lexeme.push('"');
                    self.consume();
                    return self.classify(lexeme, start);
                }
                Some(c) => {
                    lexeme.push(c);
                    self.consume();
                }
            }
        }
    }

    /// Read an `@[ ... ]` calculation verbatim. The caller has consumed the
    /// `@` and seen the `[`.
    fn scan_expression(&mut self, mut lexeme: String, start: Loc) -> Result<Token, ParseError> {
        loop {
            match self.peek_char() {
                None => return self.fail(ParseError::UnterminatedExpression { loc: start }),
                Some(']') => {
                    lexeme.push(']');
                    self.consume();
                    return self.classify(lexeme, start);
                }
                Some(c) => {
                    lexeme.push(c);
                    self.consume();
                }
            }
        }
    }

    /// Read an operator, merging characters as long as the result is still in
    /// the operator table. `===` comes out as `==` followed by `=`.
    fn scan_operator(&mut self) -> Result<Token, ParseError> {
        let start = self.loc.clone();
        let mut op = String::new();
        if let Some(c) = self.peek_char() {
            op.push(c);
            self.consume();
        }
        while let Some(c) = self.peek_char() {
            op.push(c);
            if is_operator_text(&op) {
                self.consume();
            } else {
                op.pop();
                break;
            }
        }
        self.classify(op, start)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut lexeme = String::new();
        let mut start = self.loc.clone();
        while let Some(c) = self.peek_char() {
            // A pending lexeme ends at any boundary. The boundary character
            // itself is not consumed; the next call deals with it.
            if !lexeme.is_empty() && is_boundary(c) {
                return Some(self.classify(lexeme, start));
            }
            match c {
                _ if c.is_ascii_whitespace() => self.consume(),
                '{' => {
                    let loc = self.loc.clone();
                    self.consume();
                    self.brace_depth += 1;
                    return Some(Ok(Token::new("{".to_string(), TokenKind::BlockStart, loc)));
                }
                '}' => {
                    let loc = self.loc.clone();
                    self.consume();
                    if self.brace_depth > 0 {
                        self.brace_depth -= 1;
                    }
                    if loc.column == 1 && self.brace_depth > 0 {
                        let msg = "possible brace error";
                        let info = "This closing brace is at the start of a line but does not close a top-level item.";
                        warn(ErrorKey::BracePlacement).weak().msg(msg).info(info).loc(&loc).push();
                    }
                    return Some(Ok(Token::new("}".to_string(), TokenKind::BlockEnd, loc)));
                }
                '#' => {
                    self.consume();
                    while let Some(c) = self.peek_char() {
                        self.consume();
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '"' => return Some(self.scan_quoted()),
                '@' => {
                    // @name is a reference to a scripted value and scans like
                    // a word; @[ starts a calculation.
                    start = self.loc.clone();
                    lexeme.push('@');
                    self.consume();
                    if self.peek_char() == Some('[') {
                        return Some(self.scan_expression(lexeme, start));
                    }
                }
                _ if is_operator_char(c) => return Some(self.scan_operator()),
                _ => {
                    if lexeme.is_empty() {
                        start = self.loc.clone();
                    }
                    lexeme.push(c);
                    self.consume();
                }
            }
        }
        if lexeme.is_empty() {
            None
        } else {
            Some(self.classify(lexeme, start))
        }
    }
}
