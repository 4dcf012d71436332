//! Term and argument parsing: the `term`, `arglist`, and `list`
//! productions of the grammar, plus the `compound` production shared by
//! both term and goal parsing.
//!
//! `[H|T]`/`[a, b, c]` list syntax desugars directly into nested `./2`
//! compounds terminated by `[]`, built up by `terms::parse_list`.

use crate::term::{list_from_vec, nil, Term};

use super::token::TokenKind;
use super::{ParseError, Parser};

impl Parser {
    /// Parses an optional `(arglist)` suffix onto an already-consumed
    /// atom name, producing a `Compound` with zero args when there is no
    /// parenthesized argument list.
    pub(super) fn parse_compound_args(&mut self, name: String) -> Result<Term, ParseError> {
        if self.at(&TokenKind::LParen) {
            self.advance();
            let args = self.parse_arglist()?;
            self.expect(&TokenKind::RParen)?;
            Ok(Term::Compound(name, args))
        } else {
            Ok(Term::Compound(name, Vec::new()))
        }
    }

    fn parse_arglist(&mut self) -> Result<Vec<Term>, ParseError> {
        let mut args = vec![self.parse_term()?];
        while self.at(&TokenKind::Comma) {
            self.advance();
            args.push(self.parse_term()?);
        }
        Ok(args)
    }

    /// `term := compound | variable | wildcard | integer | text | list`
    pub(super) fn parse_term(&mut self) -> Result<Term, ParseError> {
        match self.peek().cloned() {
            Some(TokenKind::Atom(name)) => {
                self.advance();
                self.parse_compound_args(name)
            }
            Some(TokenKind::Var(name)) => {
                self.advance();
                Ok(self.var_for(&name))
            }
            Some(TokenKind::Wildcard) => {
                self.advance();
                Ok(Term::Wildcard)
            }
            Some(TokenKind::Int(n)) => {
                self.advance();
                Ok(Term::NumLit(n))
            }
            Some(TokenKind::Text(s)) => {
                self.advance();
                Ok(Term::TextLit(s))
            }
            Some(TokenKind::LBracket) => self.parse_list(),
            other => Err(self.unexpected("a term", other)),
        }
    }

    /// `list := '[' ']' | '[' term (',' term)* ('|' term)? ']'`, desugared
    /// to nested `./2` compounds terminated by `[]`.
    fn parse_list(&mut self) -> Result<Term, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        if self.at(&TokenKind::RBracket) {
            self.advance();
            return Ok(nil());
        }
        let mut items = vec![self.parse_term()?];
        while self.at(&TokenKind::Comma) {
            self.advance();
            items.push(self.parse_term()?);
        }
        let tail = if self.at(&TokenKind::Pipe) {
            self.advance();
            self.parse_term()?
        } else {
            nil()
        };
        self.expect(&TokenKind::RBracket)?;
        Ok(list_from_vec(items, tail))
    }
}
