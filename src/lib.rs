//! Monolog is an interactive interpreter for a small Prolog-subset logic
//! language: Horn-clause facts and rules, unification, SLD-resolution
//! with chronological backtracking, and negation-as-failure.
//!
//! ```text
//! father(tom, bob).
//! father(bob, jim).
//! grandfather(X, Y) :- father(X, Z), father(Z, Y).
//! ```
//!
//! ```text
//! ?- grandfather(tom, Y).
//! Y = jim
//! ```
//!
//! There is no cut, no arithmetic evaluation, and no `assert`/`retract`
//! at query time — see the knowledge base module for when the program
//! may be mutated. A query never times out; a query that does not
//! terminate is stopped with the REPL's `:d`/`:done` command.

pub mod clause;
pub mod control;
pub mod error;
pub mod knowledge_base;
pub mod macros;
pub mod parser;
pub mod renamer;
pub mod repl;
pub mod resolver;
pub mod substitution;
pub mod term;
pub mod unifier;

pub use clause::Clause;
pub use error::{MonologError, MonologResult};
pub use knowledge_base::KnowledgeBase;
pub use parser::{parse_program, parse_query};
pub use substitution::Substitution;
pub use term::Term;
