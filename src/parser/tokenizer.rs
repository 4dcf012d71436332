//! The lexer: turns source text into a flat stream of tokens.
//!
//! Comments run from `%` to end of line, the one delimiter the surface
//! syntax supports.

use crate::parser::token::{Token, TokenKind};

pub fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let n = chars.len();

    while i < n {
        let ch = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch == '%' {
            while i < n && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        match ch {
            '(' => { tokens.push(Token::new(TokenKind::LParen)); i += 1; }
            ')' => { tokens.push(Token::new(TokenKind::RParen)); i += 1; }
            '[' => { tokens.push(Token::new(TokenKind::LBracket)); i += 1; }
            ']' => { tokens.push(Token::new(TokenKind::RBracket)); i += 1; }
            ',' => { tokens.push(Token::new(TokenKind::Comma)); i += 1; }
            ';' => { tokens.push(Token::new(TokenKind::Semicolon)); i += 1; }
            '|' => { tokens.push(Token::new(TokenKind::Pipe)); i += 1; }
            '.' => {
                // A period is a clause terminator unless it's part of a
                // float-like number, which this surface syntax does not
                // support (section 3 defines NumLit as integer only), so
                // every '.' is a Period token.
                tokens.push(Token::new(TokenKind::Period));
                i += 1;
            }
            ':' => {
                if i + 1 < n && chars[i + 1] == '-' {
                    tokens.push(Token::new(TokenKind::Neck));
                    i += 2;
                } else {
                    return Err(format!("tokenize() - unexpected character ':' at position {}", i));
                }
            }
            '\\' => {
                if i + 1 < n && chars[i + 1] == '+' {
                    tokens.push(Token::new(TokenKind::Not));
                    i += 2;
                } else {
                    return Err(format!("tokenize() - unexpected character '\\' at position {}", i));
                }
            }
            '"' => {
                let (text, next) = scan_delimited(&chars, i + 1, '"')?;
                tokens.push(Token::new(TokenKind::Text(text)));
                i = next;
            }
            '\'' => {
                let (text, next) = scan_delimited(&chars, i + 1, '\'')?;
                tokens.push(Token::new(TokenKind::Atom(text)));
                i = next;
            }
            '_' if !peek_is_ident_char(&chars, i + 1) => {
                tokens.push(Token::new(TokenKind::Wildcard));
                i += 1;
            }
            c if c.is_ascii_digit() || (c == '-' && peek_is_digit(&chars, i + 1)) => {
                let (text, next) = scan_while(&chars, i + 1, |c| c.is_ascii_digit());
                let full = format!("{}{}", c, text);
                let value: i64 = full
                    .parse()
                    .map_err(|_| format!("tokenize() - invalid integer: {}", full))?;
                tokens.push(Token::new(TokenKind::Int(value)));
                i = if c == '-' { next } else { i + 1 + text.len() };
            }
            c if c.is_alphabetic() || c == '_' => {
                let (text, next) = scan_while(&chars, i, is_ident_char);
                if c.is_uppercase() || c == '_' {
                    tokens.push(Token::new(TokenKind::Var(text)));
                } else {
                    tokens.push(Token::new(TokenKind::Atom(text)));
                }
                i = next;
            }
            other => {
                return Err(format!("tokenize() - unexpected character '{}' at position {}", other, i));
            }
        }
    }

    Ok(tokens)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn peek_is_ident_char(chars: &[char], index: usize) -> bool {
    chars.get(index).copied().map(is_ident_char).unwrap_or(false)
}

fn peek_is_digit(chars: &[char], index: usize) -> bool {
    chars.get(index).copied().map(|c| c.is_ascii_digit()).unwrap_or(false)
}

fn scan_while(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> (String, usize) {
    let mut i = start;
    let mut text = String::new();
    while i < chars.len() && pred(chars[i]) {
        text.push(chars[i]);
        i += 1;
    }
    (text, i)
}

fn scan_delimited(chars: &[char], start: usize, delimiter: char) -> Result<(String, usize), String> {
    let mut i = start;
    let mut text = String::new();
    while i < chars.len() {
        if chars[i] == delimiter {
            return Ok((text, i + 1));
        }
        if chars[i] == '\\' && i + 1 < chars.len() {
            text.push(chars[i + 1]);
            i += 2;
            continue;
        }
        text.push(chars[i]);
        i += 1;
    }
    Err(format!("tokenize() - unterminated {} string", delimiter))
}
