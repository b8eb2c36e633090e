/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Tokenizer for the Smithy IDL.

use crate::error::{LoadError, Position};
use crate::Number;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    /// Identifier or shape id, e.g. `structure`, `String`, `smithy.api#String`, `Foo$bar`.
    Ident(String),
    /// Control statement key, e.g. `$version`, without the `$`.
    Control(String),
    String(String),
    Number(Number),
    /// A `///` documentation line with the marker and one leading space removed.
    DocComment(String),
    At,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Equals,
    Eof,
}

impl Token {
    pub(super) fn describe(&self) -> String {
        match self {
            Token::Ident(value) => format!("`{value}`"),
            Token::Control(value) => format!("`${value}`"),
            Token::String(_) => "string".to_string(),
            Token::Number(_) => "number".to_string(),
            Token::DocComment(_) => "documentation comment".to_string(),
            Token::At => "`@`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::LBrace => "`{`".to_string(),
            Token::RBrace => "`}`".to_string(),
            Token::LBracket => "`[`".to_string(),
            Token::RBracket => "`]`".to_string(),
            Token::Colon => "`:`".to_string(),
            Token::Equals => "`=`".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Spanned {
    pub(super) token: Token,
    pub(super) position: Position,
}

pub(super) fn tokenize(source_name: &str, text: &str) -> Result<Vec<Spanned>, LoadError> {
    Lexer {
        source_name,
        chars: text.chars().collect(),
        offset: 0,
        line: 1,
        column: 1,
    }
    .run()
}

struct Lexer<'a> {
    source_name: &'a str,
    chars: Vec<char>,
    offset: usize,
    line: usize,
    column: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_shape_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '#' | '$')
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Spanned>, LoadError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let position = self.position();
            let Some(c) = self.peek() else {
                tokens.push(Spanned {
                    token: Token::Eof,
                    position,
                });
                return Ok(tokens);
            };
            let token = match c {
                '/' => self.doc_comment()?,
                '@' => self.single(Token::At),
                '(' => self.single(Token::LParen),
                ')' => self.single(Token::RParen),
                '{' => self.single(Token::LBrace),
                '}' => self.single(Token::RBrace),
                '[' => self.single(Token::LBracket),
                ']' => self.single(Token::RBracket),
                ':' => self.single(Token::Colon),
                '=' => self.single(Token::Equals),
                '"' => self.string()?,
                '$' => {
                    self.bump();
                    match self.peek() {
                        Some(c) if is_ident_start(c) => Token::Control(self.take_while(is_shape_id_char)),
                        _ => return Err(self.error("expected a control statement name after `$`", position)),
                    }
                }
                '-' => self.number()?,
                c if c.is_ascii_digit() => self.number()?,
                c if is_ident_start(c) => Token::Ident(self.take_while(is_shape_id_char)),
                other => {
                    return Err(self.error(format!("unexpected character `{other}`"), position))
                }
            };
            tokens.push(Spanned { token, position });
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn error(&self, message: impl Into<std::borrow::Cow<'static, str>>, position: Position) -> LoadError {
        LoadError::syntax(message, self.source_name, position)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.offset + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|c| predicate(*c)) {
            out.push(c);
            self.bump();
        }
        out
    }

    /// Skips whitespace, commas, and `//` comments. `///` comments are tokens.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('/') && self.peek_at(2) != Some('/') => {
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.bump();
                    }
                }
                _ => return,
            }
        }
    }

    fn doc_comment(&mut self) -> Result<Token, LoadError> {
        let position = self.position();
        if self.peek_at(1) != Some('/') {
            return Err(self.error("unexpected character `/`", position));
        }
        for _ in 0..3 {
            self.bump();
        }
        if self.peek() == Some(' ') {
            self.bump();
        }
        let mut line = String::new();
        while let Some(c) = self.peek().filter(|c| *c != '\n') {
            line.push(c);
            self.bump();
        }
        Ok(Token::DocComment(line.trim_end_matches('\r').to_string()))
    }

    fn string(&mut self) -> Result<Token, LoadError> {
        let start = self.position();
        if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') {
            return Err(self.error("text blocks are not supported", start));
        }
        self.bump();
        let mut out = String::new();
        loop {
            let position = self.position();
            match self.bump() {
                None => return Err(self.error("unterminated string", start)),
                Some('"') => return Ok(Token::String(out)),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{08}',
                        Some('f') => '\u{0C}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.unicode_escape(position)?,
                        Some(other) => {
                            return Err(self.error(format!("invalid escape `\\{other}`"), position))
                        }
                        None => return Err(self.error("unterminated string", start)),
                    };
                    out.push(escaped);
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn hex4(&mut self, position: Position) -> Result<u32, LoadError> {
        let mut value = 0;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid unicode escape", position))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn unicode_escape(&mut self, position: Position) -> Result<char, LoadError> {
        let high = self.hex4(position)?;
        let code = if (0xD800..0xDC00).contains(&high) {
            if self.bump() != Some('\\') || self.bump() != Some('u') {
                return Err(self.error("unpaired surrogate in unicode escape", position));
            }
            let low = self.hex4(position)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(self.error("unpaired surrogate in unicode escape", position));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape", position))
    }

    fn number(&mut self) -> Result<Token, LoadError> {
        let position = self.position();
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(self.error("expected digits", position));
        }
        text.push_str(&digits);
        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_at(1).map_or(false, |c| c.is_ascii_digit()) {
            is_float = true;
            text.push('.');
            self.bump();
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            text.push('e');
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            let exponent = self.take_while(|c| c.is_ascii_digit());
            if exponent.is_empty() {
                return Err(self.error("expected exponent digits", position));
            }
            text.push_str(&exponent);
        }
        let number = if is_float {
            // Out-of-range literals such as `1e999` parse to infinity, which has no JSON form.
            text.parse::<f64>().ok().filter(|f| f.is_finite()).map(Number::Float)
        } else if let Ok(value) = text.parse::<u64>() {
            Some(Number::PosInt(value))
        } else {
            text.parse::<i64>().ok().map(Number::from)
        };
        number
            .map(Token::Number)
            .ok_or_else(|| self.error(format!("invalid number `{text}`"), position))
    }
}
