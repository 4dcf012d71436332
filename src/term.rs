//! The term model: the algebraic representation of patterns, clause
//! heads/bodies, and goals shared by the unifier, renamer, and resolver.
//!
//! The goal-form connectives (`Negation`, `Conjunction`, `Disjunction`)
//! are variants of this same type rather than living in a separate
//! goal/operator pair of enums, so every consumer matches on one shape.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::control::next_var_id;
use crate::substitution::Substitution;

/// A term: data, pattern, or (when built from Compound/Var/Negation/
/// Conjunction/Disjunction) a goal.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Lowercase-initial symbolic constant.
    Atom(String),
    /// Ground integer literal.
    NumLit(i64),
    /// Ground string literal.
    TextLit(String),
    /// A logic variable. Identity is (name, scope); `id` is a unique
    /// index assigned when the variable is created, used to address the
    /// substitution vector directly instead of hashing (name, scope) on
    /// every lookup.
    Var {
        name: String,
        scope: u64,
        id: usize,
        /// True for variables synthesized from a Wildcard at rename
        /// time; such variables never appear in a displayed answer.
        anonymous: bool,
    },
    /// Matches anything; unbindable. Only appears in clauses as parsed,
    /// before the renamer replaces each occurrence with a fresh
    /// anonymous Var.
    Wildcard,
    /// Functor application; arity is `args.len()`.
    Compound(String, Vec<Term>),
    /// "Not provable" — goal form only.
    Negation(Box<Term>),
    /// Goal-form left-then-right conjunction.
    Conjunction(Box<Term>, Box<Term>),
    /// Goal-form left-then-right disjunction.
    Disjunction(Box<Term>, Box<Term>),
}

impl Term {
    /// Builds a fresh, named, scope-0 variable (used by the parser for
    /// the variables occurring literally in a query).
    pub fn var(name: &str, scope: u64) -> Term {
        Term::Var {
            name: name.to_string(),
            scope,
            id: next_var_id(),
            anonymous: false,
        }
    }

    /// Builds a fresh anonymous variable, standing in for one occurrence
    /// of `_`.
    pub fn fresh_anonymous(scope: u64) -> Term {
        Term::Var {
            name: "_".to_string(),
            scope,
            id: next_var_id(),
            anonymous: true,
        }
    }

    pub fn compound(name: &str, args: Vec<Term>) -> Term {
        Term::Compound(name.to_string(), args)
    }

    /// `{name}/{arity}` key, used by the knowledge base to bucket
    /// clauses. Panics if called on anything but a Compound, mirroring
    /// unifiable.rs's `key()`.
    pub fn key(&self) -> String {
        match self {
            Term::Compound(name, args) => format!("{}/{}", name, args.len()),
            _ => panic!("Term::key() - not a Compound: {}", self),
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var { .. })
    }

    pub fn as_var_id(&self) -> Option<usize> {
        match self {
            Term::Var { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Dereferences a term one level under a substitution: if it is a bound
/// variable, follow the binding; repeat until a non-variable or an
/// unbound variable is reached. Does not recurse into compound
/// arguments — see `resolve` for the deep form.
pub fn walk(term: &Term, ss: &Substitution) -> Term {
    let mut current = term.clone();
    loop {
        match &current {
            Term::Var { id, .. } => match ss.get_binding(*id) {
                Some(bound) => current = (*bound).clone(),
                None => return current,
            },
            _ => return current,
        }
    }
}

/// Walks, then recursively resolves every sub-term of the result.
/// Used only when materializing an answer for display.
///
/// With the occurs check off, unification is free to produce a cyclic
/// binding (section 8's scenario 2/5: `A = s(A)`-shaped answers). A plain
/// recursive walk-and-resolve would recurse forever rendering such a
/// binding, so this tracks which variable ids are currently being
/// expanded on the current path and leaves a repeated one unresolved
/// instead of unrolling it indefinitely.
pub fn resolve(term: &Term, ss: &Substitution) -> Term {
    let mut in_progress = HashSet::new();
    resolve_guarded(term, ss, &mut in_progress)
}

fn resolve_guarded(term: &Term, ss: &Substitution, in_progress: &mut HashSet<usize>) -> Term {
    if let Term::Var { id, .. } = term {
        if in_progress.contains(id) {
            return term.clone();
        }
        return match ss.get_binding(*id) {
            None => term.clone(),
            Some(bound) => {
                in_progress.insert(*id);
                let result = resolve_guarded(bound, ss, in_progress);
                in_progress.remove(id);
                result
            }
        };
    }
    match term {
        Term::Compound(name, args) => {
            let resolved: Vec<Term> = args.iter().map(|a| resolve_guarded(a, ss, in_progress)).collect();
            Term::Compound(name.clone(), resolved)
        }
        Term::Negation(inner) => Term::Negation(Box::new(resolve_guarded(inner, ss, in_progress))),
        Term::Conjunction(l, r) => Term::Conjunction(
            Box::new(resolve_guarded(l, ss, in_progress)),
            Box::new(resolve_guarded(r, ss, in_progress)),
        ),
        Term::Disjunction(l, r) => Term::Disjunction(
            Box::new(resolve_guarded(l, ss, in_progress)),
            Box::new(resolve_guarded(r, ss, in_progress)),
        ),
        other => other.clone(),
    }
}

/// Returns true if `var_id` occurs anywhere in `term`, walking through
/// bound variables as it goes. Used by the unifier's occurs check.
pub fn occurs(var_id: usize, term: &Term, ss: &Substitution) -> bool {
    let walked = walk(term, ss);
    match walked {
        Term::Var { id, .. } => id == var_id,
        Term::Compound(_, args) => args.iter().any(|a| occurs(var_id, a, ss)),
        Term::Negation(inner) => occurs(var_id, &inner, ss),
        Term::Conjunction(l, r) => occurs(var_id, &l, ss) || occurs(var_id, &r, ss),
        Term::Disjunction(l, r) => occurs(var_id, &l, ss) || occurs(var_id, &r, ss),
        _ => false,
    }
}

/// Convenience constructors for the conventional list shapes mentioned
/// in the data model: `Cons(h, t)` as `./2`, `Nil` as `[]/0`.
pub fn cons(head: Term, tail: Term) -> Term {
    Term::Compound(".".to_string(), vec![head, tail])
}

pub fn nil() -> Term {
    Term::Atom("[]".to_string())
}

pub fn list_from_vec(items: Vec<Term>, tail: Term) -> Term {
    let mut result = tail;
    for item in items.into_iter().rev() {
        result = cons(item, result);
    }
    result
}

/// Builds a printable representation of a `./2`-`[]`-shaped list, or
/// `None` if the term is not such a list.
fn format_list(name: &str, args: &[Term]) -> Option<String> {
    if name != "." || args.len() != 2 {
        return None;
    }
    let mut parts = vec![args[0].to_string()];
    let mut tail = &args[1];
    loop {
        match tail {
            Term::Atom(a) if a == "[]" => {
                return Some(format!("[{}]", parts.join(", ")));
            }
            Term::Compound(n, a) if n == "." && a.len() == 2 => {
                parts.push(a[0].to_string());
                tail = &a[1];
            }
            other => {
                return Some(format!("[{} | {}]", parts.join(", "), other));
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Atom(name) => write!(f, "{}", name),
            Term::NumLit(n) => write!(f, "{}", n),
            Term::TextLit(s) => write!(f, "\"{}\"", s),
            Term::Var { name, anonymous, .. } => {
                if *anonymous {
                    write!(f, "_")
                } else {
                    write!(f, "{}", name)
                }
            }
            Term::Wildcard => write!(f, "_"),
            Term::Compound(name, args) => {
                if let Some(list_str) = format_list(name, args) {
                    return write!(f, "{}", list_str);
                }
                if args.is_empty() {
                    write!(f, "{}", name)
                } else {
                    let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                    write!(f, "{}({})", name, rendered.join(", "))
                }
            }
            Term::Negation(inner) => write!(f, "\\+{}", inner),
            Term::Conjunction(l, r) => write!(f, "{}, {}", l, r),
            Term::Disjunction(l, r) => write!(f, "{}; {}", l, r),
        }
    }
}

/// A term wrapped in `Rc` for cheap sharing inside solution nodes.
pub type RcTerm = Rc<Term>;

#[cfg(test)]
mod test {

    use super::*;
    use crate::control::reset_for_query;
    use crate::substitution::Substitution;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_key() {
        reset_for_query();
        let t = Term::compound("father", vec![Term::Atom("tom".to_string())]);
        assert_eq!("father/1", t.key());
    }

    #[test]
    #[should_panic]
    fn test_key_panics_on_non_compound() {
        let t = Term::Atom("tom".to_string());
        t.key();
    }

    #[test]
    #[serial]
    fn test_display_atom_and_compound() {
        reset_for_query();
        let t = Term::compound(
            "father",
            vec![Term::Atom("tom".to_string()), Term::Atom("bob".to_string())],
        );
        assert_eq!("father(tom, bob)", t.to_string());
    }

    #[test]
    #[serial]
    fn test_display_list() {
        reset_for_query();
        let list = list_from_vec(
            vec![Term::NumLit(1), Term::NumLit(2), Term::NumLit(3)],
            nil(),
        );
        assert_eq!("[1, 2, 3]", list.to_string());

        let tail_var = Term::var("T", 0);
        let open_list = list_from_vec(vec![Term::Atom("a".to_string())], tail_var);
        assert_eq!("[a | T]", open_list.to_string());
    }

    #[test]
    #[serial]
    fn test_walk_and_resolve() {
        reset_for_query();
        let mut ss = Substitution::new();
        let x = Term::var("X", 0);
        let xid = x.as_var_id().unwrap();
        let bound = Term::compound("f", vec![Term::Atom("a".to_string())]);
        ss.bind(xid, Rc::new(bound.clone()));

        assert_eq!(bound, walk(&x, &ss));
        assert_eq!(bound, resolve(&x, &ss));
    }

    #[test]
    #[serial]
    fn test_occurs() {
        reset_for_query();
        let ss = Substitution::new();
        let x = Term::var("X", 0);
        let xid = x.as_var_id().unwrap();
        let t = Term::compound("f", vec![x.clone()]);
        assert!(occurs(xid, &t, &ss));

        let y = Term::var("Y", 0);
        let t2 = Term::compound("f", vec![y]);
        assert!(!occurs(xid, &t2, &ss));
    }
}
