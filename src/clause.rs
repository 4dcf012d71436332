//! A stored knowledge-base entry: a fact or a rule.

use std::fmt;

use crate::term::Term;

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Fact(Term),
    Rule(Term, Term),
}

impl Clause {
    pub fn fact(head: Term) -> Clause {
        Clause::Fact(head)
    }

    pub fn rule(head: Term, body: Term) -> Clause {
        Clause::Rule(head, body)
    }

    pub fn head(&self) -> &Term {
        match self {
            Clause::Fact(head) => head,
            Clause::Rule(head, _) => head,
        }
    }

    pub fn body(&self) -> Option<&Term> {
        match self {
            Clause::Fact(_) => None,
            Clause::Rule(_, body) => Some(body),
        }
    }

    pub fn key(&self) -> String {
        self.head().key()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Clause::Fact(head) => write!(f, "{}.", head),
            Clause::Rule(head, body) => write!(f, "{} :- {}.", head, body),
        }
    }
}
