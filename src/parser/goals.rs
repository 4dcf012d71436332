//! Goal and clause parsing: the `clause`, `disjunction`, `conjunction`,
//! `negation`, and `primary` productions of the grammar.
//!
//! Precedence, tightest to loosest: negation, conjunction, disjunction —
//! a direct recursive-descent chain over the flat token stream (see
//! `token.rs`'s module doc for why no separate grouping pass is needed).

use crate::clause::Clause;
use crate::term::Term;

use super::token::TokenKind;
use super::{ParseError, Parser};

impl Parser {
    /// `disjunction := conjunction (';' conjunction)*`
    pub(super) fn parse_disjunction(&mut self) -> Result<Term, ParseError> {
        let mut left = self.parse_conjunction()?;
        while self.at(&TokenKind::Semicolon) {
            self.advance();
            let right = self.parse_conjunction()?;
            left = Term::Disjunction(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    /// `conjunction := negation (',' negation)*`
    fn parse_conjunction(&mut self) -> Result<Term, ParseError> {
        let mut left = self.parse_negation()?;
        while self.at(&TokenKind::Comma) {
            self.advance();
            let right = self.parse_negation()?;
            left = Term::Conjunction(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    /// `negation := '\+' negation | primary`
    fn parse_negation(&mut self) -> Result<Term, ParseError> {
        if self.at(&TokenKind::Not) {
            self.advance();
            return Ok(Term::Negation(Box::new(self.parse_negation()?)));
        }
        self.parse_goal_primary()
    }

    /// `primary := compound | variable | '(' disjunction ')'`
    ///
    /// A bare atom always becomes a zero-arity `Compound`, never a
    /// `Term::Atom`: `Atom` is reserved for data/argument positions.
    fn parse_goal_primary(&mut self) -> Result<Term, ParseError> {
        match self.peek().cloned() {
            Some(TokenKind::Atom(name)) => {
                self.advance();
                self.parse_compound_args(name)
            }
            Some(TokenKind::Var(name)) => {
                self.advance();
                Ok(self.var_for(&name))
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let inner = self.parse_disjunction()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(self.unexpected("a goal", other)),
        }
    }

    /// `clause := head ('.' | ':-' body '.')`
    pub(super) fn parse_clause(&mut self) -> Result<Clause, ParseError> {
        self.vars.clear();
        let head = self.parse_head()?;
        match self.peek().cloned() {
            Some(TokenKind::Period) => {
                self.advance();
                Ok(Clause::fact(head))
            }
            Some(TokenKind::Neck) => {
                self.advance();
                let body = self.parse_disjunction()?;
                self.expect(&TokenKind::Period)?;
                Ok(Clause::rule(head, body))
            }
            other => Err(self.unexpected("':-' or '.'", other)),
        }
    }

    /// `head := compound`
    fn parse_head(&mut self) -> Result<Term, ParseError> {
        match self.peek().cloned() {
            Some(TokenKind::Atom(name)) => {
                self.advance();
                self.parse_compound_args(name)
            }
            other => Err(self.unexpected("a clause head", other)),
        }
    }
}
