//! The substitution: a mapping from variable-identity to term.
//!
//! Backed by `Vec<Option<Rc<Term>>>` indexed by variable id: cloning an
//! `Rc` is far cheaper than cloning the term it points to, and a new
//! binding only ever extends a cloned copy, never mutates a substitution
//! another choice point still holds a reference to.

use std::fmt;
use std::rc::Rc;

use crate::term::Term;

/// `Substitution` is a persistent-by-convention mapping: callers extend it
/// by cloning the `Rc<Substitution>` they hold and producing a new one
/// with one more binding appended (see the unifier), never by mutating a
/// substitution another choice point still holds a reference to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Substitution {
    bindings: Vec<Option<Rc<Term>>>,
}

impl Substitution {
    pub fn new() -> Substitution {
        Substitution { bindings: Vec::new() }
    }

    /// True if the variable with this id has a binding.
    pub fn is_bound(&self, var_id: usize) -> bool {
        self.get_binding(var_id).is_some()
    }

    /// Returns the term a variable id is bound to, if any.
    pub fn get_binding(&self, var_id: usize) -> Option<&Rc<Term>> {
        self.bindings.get(var_id).and_then(|slot| slot.as_ref())
    }

    /// Extends the substitution, growing the backing vector if the id is
    /// past its current end. Returns a new substitution; does not mutate
    /// `self` in place beyond this owned copy, so callers threading a
    /// substitution through a unification attempt that may fail should
    /// clone before calling this, exactly as the unifier does.
    pub fn bind(&mut self, var_id: usize, term: Rc<Term>) {
        if var_id >= self.bindings.len() {
            self.bindings.resize(var_id + 1, None);
        }
        self.bindings[var_id] = Some(term);
    }

    /// Returns a copy of this substitution with one additional binding.
    pub fn extended(&self, var_id: usize, term: Rc<Term>) -> Substitution {
        let mut next = self.clone();
        next.bind(var_id, term);
        next
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "----- Substitution -----")?;
        for (i, slot) in self.bindings.iter().enumerate() {
            match slot {
                Some(term) => writeln!(f, "{}\t{}", i, term)?,
                None => writeln!(f, "{}\tNone", i)?,
            }
        }
        write!(f, "-------------------------")
    }
}
