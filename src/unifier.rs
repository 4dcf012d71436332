//! Two-way unification of terms modulo a substitution.

use std::rc::Rc;

use crate::control::occurs_check_enabled;
use crate::substitution::Substitution;
use crate::term::{occurs, resolve, walk, Term};

/// Attempts to unify two terms under a substitution, following the
/// seven-step algorithm: walk both sides, handle identical variables,
/// variable-to-term binding (gated by the occurs check when enabled),
/// wildcards, equal literals/atoms, and equal-arity compounds recursively.
/// Returns the extended substitution on success, `None` on failure.
///
/// `Negation`, `Conjunction`, and `Disjunction` are goal forms, never valid
/// unification operands; passing one in is a caller error and panics.
pub fn unify(a: &Term, b: &Term, ss: &Substitution) -> Option<Substitution> {
    let wa = walk(a, ss);
    let wb = walk(b, ss);
    unify_walked(&wa, &wb, ss)
}

fn unify_walked(a: &Term, b: &Term, ss: &Substitution) -> Option<Substitution> {
    assert_operand(a);
    assert_operand(b);

    // Step 2: identical variables unify with no change.
    if let (Term::Var { id: ida, .. }, Term::Var { id: idb, .. }) = (a, b) {
        if ida == idb {
            return Some(ss.clone());
        }
    }

    // Step 4: wildcard matches anything, binds to nothing.
    if matches!(a, Term::Wildcard) || matches!(b, Term::Wildcard) {
        return Some(ss.clone());
    }

    // Step 3: variable-to-term binding, either side.
    if let Term::Var { id, .. } = a {
        return bind_variable(*id, b, ss);
    }
    if let Term::Var { id, .. } = b {
        return bind_variable(*id, a, ss);
    }

    match (a, b) {
        // Step 5: equal literals/atoms.
        (Term::Atom(x), Term::Atom(y)) => {
            if x == y {
                Some(ss.clone())
            } else {
                None
            }
        }
        (Term::NumLit(x), Term::NumLit(y)) => {
            if x == y {
                Some(ss.clone())
            } else {
                None
            }
        }
        (Term::TextLit(x), Term::TextLit(y)) => {
            if x == y {
                Some(ss.clone())
            } else {
                None
            }
        }
        // Step 6: equal-arity compounds, unify arguments pairwise.
        (Term::Compound(na, args_a), Term::Compound(nb, args_b)) => {
            if na != nb || args_a.len() != args_b.len() {
                return None;
            }
            let mut current = ss.clone();
            for (x, y) in args_a.iter().zip(args_b.iter()) {
                current = unify(x, y, &current)?;
            }
            Some(current)
        }
        // Step 7: anything else fails.
        _ => None,
    }
}

fn bind_variable(var_id: usize, term: &Term, ss: &Substitution) -> Option<Substitution> {
    if occurs_check_enabled() {
        let resolved = resolve(term, ss);
        if occurs(var_id, &resolved, ss) {
            return None;
        }
    }
    Some(ss.extended(var_id, Rc::new(term.clone())))
}

fn assert_operand(term: &Term) {
    match term {
        Term::Negation(_) | Term::Conjunction(_, _) | Term::Disjunction(_, _) => {
            panic!("unify() - {} is a goal connective, not a unifiable term", term)
        }
        _ => {}
    }
}
