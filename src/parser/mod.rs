//! Turns source text into `Term`/`Clause` values: lexing (`tokenizer`),
//! the token stream type (`token`), and recursive-descent parsing
//! (`terms`, `goals`) behind the two entry points named in the surface
//! syntax: [`parse_program`] and [`parse_query`].

mod goals;
mod terms;
mod token;
mod tokenizer;

pub use token::{Token, TokenKind};

use std::collections::HashMap;

use crate::clause::Clause;
use crate::error::MonologError;
use crate::term::Term;

pub type ParseError = MonologError;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Maps a variable name to the one `Term::var` already produced for
    /// it within the clause or query currently being parsed, so that two
    /// occurrences of the same name (e.g. `plus(A, B, B)`) refer to the
    /// same variable identity rather than two coincidentally same-named
    /// ones. Cleared at each clause boundary by `parse_clause`; a fresh
    /// `Parser` (as `parse_query` always builds) starts empty.
    vars: HashMap<String, Term>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser { tokens, pos: 0, vars: HashMap::new() }
    }

    /// Returns the variable already assigned to `name` within the
    /// current clause/query, or assigns and records a fresh one.
    fn var_for(&mut self, name: &str) -> Term {
        if let Some(existing) = self.vars.get(name) {
            return existing.clone();
        }
        let fresh = Term::var(name, 0);
        self.vars.insert(name.to_string(), fresh.clone());
        fresh
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token.map(|t| t.kind)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.at(kind) {
            self.advance();
            Ok(())
        } else {
            let found = self.peek().cloned();
            Err(self.unexpected(&kind.to_string(), found))
        }
    }

    fn unexpected(&self, wanted: &str, found: Option<TokenKind>) -> ParseError {
        match found {
            Some(kind) => MonologError::ParseError(format!(
                "expected {}, found '{}'",
                wanted, kind
            )),
            None => MonologError::ParseError(format!("expected {}, found end of input", wanted)),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Parses an entire program: zero or more clauses, each terminated by a
/// `.`. An empty program (including one that is all comments) is valid.
pub fn parse_program(text: &str) -> Result<Vec<Clause>, ParseError> {
    let tokens = tokenizer::tokenize(text).map_err(MonologError::ParseError)?;
    let mut parser = Parser::new(tokens);
    let mut clauses = Vec::new();
    while !parser.at_end() {
        clauses.push(parser.parse_clause()?);
    }
    Ok(clauses)
}

/// Parses a single query goal. The REPL accepts queries with or without
/// a trailing `.`, so it is optional here (unlike in a stored clause).
pub fn parse_query(text: &str) -> Result<Term, ParseError> {
    let tokens = tokenizer::tokenize(text).map_err(MonologError::ParseError)?;
    let mut parser = Parser::new(tokens);
    let goal = parser.parse_disjunction()?;
    if parser.at(&TokenKind::Period) {
        parser.advance();
    }
    if !parser.at_end() {
        let found = parser.peek().cloned();
        return Err(parser.unexpected("end of input", found));
    }
    Ok(goal)
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::control::reset_for_query;
    use crate::term::{cons, nil};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_program_facts_and_rule() {
        reset_for_query();
        let program = "father(tom, bob).\nfather(bob, jim).\ngrandfather(X, Y) :- father(X, Z), father(Z, Y).\n";
        let clauses = parse_program(program).unwrap();
        assert_eq!(3, clauses.len());
        assert_eq!("father(tom, bob).", clauses[0].to_string());
        assert!(clauses[2].body().is_some());
    }

    #[test]
    #[serial]
    fn test_parse_program_ignores_comments() {
        reset_for_query();
        let program = "% a fact about tom\nfather(tom, bob). % trailing note\n";
        let clauses = parse_program(program).unwrap();
        assert_eq!(1, clauses.len());
    }

    #[test]
    #[serial]
    fn test_parse_query_zero_arity_goal() {
        reset_for_query();
        let goal = parse_query("start").unwrap();
        assert_eq!(Term::Compound("start".to_string(), Vec::new()), goal);
    }

    #[test]
    #[serial]
    fn test_parse_query_conjunction_and_disjunction_precedence() {
        reset_for_query();
        // `a, b ; c` should parse as `(a, b) ; c`, not `a, (b ; c)`.
        let goal = parse_query("a, b ; c.").unwrap();
        match goal {
            Term::Disjunction(left, right) => {
                assert!(matches!(*left, Term::Conjunction(_, _)));
                assert_eq!(Term::Compound("c".to_string(), Vec::new()), *right);
            }
            other => panic!("expected a disjunction, got {}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_query_negation_binds_tighter_than_conjunction() {
        reset_for_query();
        let goal = parse_query("\\+ a, b").unwrap();
        match goal {
            Term::Conjunction(left, _) => {
                assert!(matches!(*left, Term::Negation(_)));
            }
            other => panic!("expected a conjunction, got {}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_query_parenthesized_grouping() {
        reset_for_query();
        let goal = parse_query("\\+ (a ; b)").unwrap();
        if let Term::Negation(inner) = goal {
            assert!(matches!(*inner, Term::Disjunction(_, _)));
        } else {
            panic!("expected a negation");
        }
    }

    #[test]
    #[serial]
    fn test_parse_list_sugar() {
        reset_for_query();
        let term = parse_query("foo([1, 2 | T])").unwrap();
        if let Term::Compound(_, args) = term {
            let expected = cons(Term::NumLit(1), cons(Term::NumLit(2), Term::var("T", 0)));
            // Compare everything but the variable id, which is
            // assignment-order dependent.
            assert_eq!(expected.to_string(), args[0].to_string());
        } else {
            panic!("expected a compound");
        }
    }

    #[test]
    #[serial]
    fn test_parse_empty_list() {
        reset_for_query();
        let term = parse_query("foo([])").unwrap();
        if let Term::Compound(_, args) = term {
            assert_eq!(nil(), args[0]);
        } else {
            panic!("expected a compound");
        }
    }

    #[test]
    #[serial]
    fn test_parse_program_rejects_missing_period() {
        reset_for_query();
        assert!(parse_program("father(tom, bob)").is_err());
    }

    #[test]
    #[serial]
    fn test_parse_query_rejects_trailing_garbage() {
        reset_for_query();
        assert!(parse_query("a) b").is_err());
    }
}
