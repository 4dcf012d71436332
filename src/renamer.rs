//! Renaming apart: producing a fresh copy of a clause whose variables
//! carry a new scope-id, so that recursive uses of the same clause at
//! different depths never collide.
//!
//! A variable's textual name maps to one freshly assigned id within a
//! clause instance, so repeated occurrences of the same name share one
//! fresh variable, while each `Wildcard` gets its own brand new variable
//! on every visit, never looked up or cached.

use std::collections::HashMap;

use crate::clause::Clause;
use crate::term::Term;

/// Maps a variable's name to the fresh (scope, id) pair already assigned
/// to it within the clause instance currently being renamed.
type VarMap = HashMap<String, Term>;

/// Renames every variable in `clause` to carry `scope`, returning a fresh
/// clause. Does not mutate the stored clause.
pub fn rename_clause(clause: &Clause, scope: u64) -> Clause {
    let mut vars = VarMap::new();
    let head = rename_term(clause.head(), scope, &mut vars);
    match clause.body() {
        None => Clause::fact(head),
        Some(body) => Clause::rule(head, rename_term(body, scope, &mut vars)),
    }
}

fn rename_term(term: &Term, scope: u64, vars: &mut VarMap) -> Term {
    match term {
        Term::Var { name, .. } => vars
            .entry(name.clone())
            .or_insert_with(|| Term::var(name, scope))
            .clone(),
        Term::Wildcard => Term::fresh_anonymous(scope),
        Term::Compound(name, args) => {
            let renamed = args.iter().map(|a| rename_term(a, scope, vars)).collect();
            Term::Compound(name.clone(), renamed)
        }
        Term::Negation(inner) => Term::Negation(Box::new(rename_term(inner, scope, vars))),
        Term::Conjunction(l, r) => Term::Conjunction(
            Box::new(rename_term(l, scope, vars)),
            Box::new(rename_term(r, scope, vars)),
        ),
        Term::Disjunction(l, r) => Term::Disjunction(
            Box::new(rename_term(l, scope, vars)),
            Box::new(rename_term(r, scope, vars)),
        ),
        // Atoms, numbers, text are ground; nothing to rename.
        other => other.clone(),
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::control::{next_scope_id, reset_for_query};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_rename_shares_variable_within_clause() {
        reset_for_query();
        let head = Term::compound("sibling", vec![Term::var("X", 0), Term::var("Y", 0)]);
        let body = Term::Conjunction(
            Box::new(Term::compound("parent", vec![Term::var("Z", 0), Term::var("X", 0)])),
            Box::new(Term::compound("parent", vec![Term::var("Z", 0), Term::var("Y", 0)])),
        );
        let clause = Clause::rule(head, body);
        let scope = next_scope_id();
        let renamed = rename_clause(&clause, scope);

        // The two occurrences of Z in the body must be the very same
        // variable (same id), since renaming must share names within a
        // single clause instance.
        if let Term::Conjunction(l, r) = renamed.body().unwrap() {
            let lz = if let Term::Compound(_, args) = l.as_ref() {
                args[0].as_var_id().unwrap()
            } else {
                panic!("expected compound")
            };
            let rz = if let Term::Compound(_, args) = r.as_ref() {
                args[0].as_var_id().unwrap()
            } else {
                panic!("expected compound")
            };
            assert_eq!(lz, rz);
        } else {
            panic!("expected conjunction");
        }
    }

    #[test]
    #[serial]
    fn test_rename_assigns_given_scope() {
        reset_for_query();
        let head = Term::compound("p", vec![Term::var("X", 0)]);
        let clause = Clause::fact(head);
        let scope = next_scope_id();
        let renamed = rename_clause(&clause, scope);
        if let Term::Compound(_, args) = renamed.head() {
            if let Term::Var { scope: s, .. } = &args[0] {
                assert_eq!(scope, *s);
                return;
            }
        }
        panic!("expected a renamed variable carrying the new scope");
    }

    #[test]
    #[serial]
    fn test_rename_does_not_mutate_original() {
        reset_for_query();
        let head = Term::compound("p", vec![Term::var("X", 0)]);
        let clause = Clause::fact(head.clone());
        let _ = rename_clause(&clause, next_scope_id());
        assert_eq!(&head, clause.head());
    }

    #[test]
    #[serial]
    fn test_rename_wildcards_are_independent() {
        reset_for_query();
        let head = Term::compound("p", vec![Term::Wildcard, Term::Wildcard]);
        let clause = Clause::fact(head);
        let renamed = rename_clause(&clause, next_scope_id());
        if let Term::Compound(_, args) = renamed.head() {
            let id0 = args[0].as_var_id().unwrap();
            let id1 = args[1].as_var_id().unwrap();
            assert_ne!(id0, id1, "each wildcard occurrence must be independent");
        } else {
            panic!("expected compound");
        }
    }

    #[test]
    #[serial]
    fn test_renaming_disjointness_across_two_instantiations() {
        reset_for_query();
        let head = Term::compound("p", vec![Term::var("X", 0)]);
        let clause = Clause::fact(head);
        let first = rename_clause(&clause, next_scope_id());
        let second = rename_clause(&clause, next_scope_id());
        let id_first = if let Term::Compound(_, args) = first.head() {
            args[0].as_var_id().unwrap()
        } else {
            panic!()
        };
        let id_second = if let Term::Compound(_, args) = second.head() {
            args[0].as_var_id().unwrap()
        } else {
            panic!()
        };
        assert_ne!(id_first, id_second);
    }
}
