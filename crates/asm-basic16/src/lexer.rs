//! Source text to tokens.
//!
//! Basic16 assembly is line oriented. Spaces and tabs separate words, `,`
//! and `:` are tokens of their own, and `;` starts a comment that runs to
//! the end of the line. Every source line, blank or not, ends with an
//! [`TokenKind::Eol`] token so the parser can count lines.
//!
//! Words are classified here but not validated: a bad hex literal is still
//! a [`TokenKind::Hex`] token and is rejected when the parser resolves it.

use cpu_basic16::isa;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Instruction mnemonic or register name.
    Reserved,
    /// Word starting with `0x`.
    Hex,
    /// Anything else: label definitions and references.
    Ident,
    Comma,
    Colon,
    Eol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

fn classify(word: &str) -> TokenKind {
    if word.starts_with("0x") {
        TokenKind::Hex
    } else if isa::by_mnemonic(word).is_some() || isa::register_by_name(word).is_some() {
        TokenKind::Reserved
    } else {
        TokenKind::Ident
    }
}

fn flush(word: &mut String, line: usize, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(Token::new(classify(word), std::mem::take(word), line));
    }
}

/// Split source text into tokens.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let code = raw.split_once(';').map_or(raw, |(code, _)| code);
        let mut word = String::new();
        for ch in code.chars() {
            match ch {
                ' ' | '\t' | '\r' => flush(&mut word, line, &mut tokens),
                ',' => {
                    flush(&mut word, line, &mut tokens);
                    tokens.push(Token::new(TokenKind::Comma, ",", line));
                }
                ':' => {
                    flush(&mut word, line, &mut tokens);
                    tokens.push(Token::new(TokenKind::Colon, ":", line));
                }
                _ => word.push(ch),
            }
        }
        flush(&mut word, line, &mut tokens);
        tokens.push(Token::new(TokenKind::Eol, "\n", line));
    }
    tokens
}
