//! Conjunction and disjunction search, split out of `next_solution` into
//! their own module since each needs its own left/right node-caching
//! logic.

use std::cell::RefCell;
use std::rc::Rc;

use crate::control::stop_requested;
use crate::substitution::Substitution;
use crate::term::Term;

use super::{make_node, SolutionNode};

type Solve = fn(Rc<RefCell<SolutionNode>>) -> Option<Rc<Substitution>>;

/// All answers from solving `left` then `right` under each of them, in
/// that order, depth-first: every answer reachable from the first
/// left-answer is produced before the second left-answer is tried.
pub fn next_solution_and(
    sn: Rc<RefCell<SolutionNode>>,
    left: Term,
    right: Term,
    solve: Solve,
) -> Option<Rc<Substitution>> {
    // Resume a cached tail (still producing answers for the current
    // left-answer) before asking the left side for another one.
    let cached_tail = sn.borrow().tail_sn.clone();
    if let Some(tail_sn) = cached_tail {
        if let Some(ss) = solve(tail_sn) {
            return Some(ss);
        }
        sn.borrow_mut().tail_sn = None;
    }

    let head_sn = ensure_head_sn(&sn, &left);

    loop {
        if stop_requested() {
            return None;
        }
        let ss1 = match solve(Rc::clone(&head_sn)) {
            None => return None,
            Some(ss) => ss,
        };
        let kb = Rc::clone(&sn.borrow().kb);
        let tail_sn = make_node(Rc::new(right.clone()), kb, ss1);
        sn.borrow_mut().tail_sn = Some(Rc::clone(&tail_sn));
        if let Some(ss2) = solve(tail_sn) {
            return Some(ss2);
        }
        sn.borrow_mut().tail_sn = None;
        // This left-answer's right side is exhausted; ask for another
        // left-answer and try again.
    }
}

/// All answers from `left`, then all answers from `right`, under the
/// incoming substitution.
pub fn next_solution_or(
    sn: Rc<RefCell<SolutionNode>>,
    left: Term,
    right: Term,
    solve: Solve,
) -> Option<Rc<Substitution>> {
    // Once the left branch is exhausted we fall back to the right branch
    // permanently: a cached tail means "left is done, only try right now."
    let cached_tail = sn.borrow().tail_sn.clone();
    if let Some(tail_sn) = cached_tail {
        return solve(tail_sn);
    }

    let head_sn = ensure_head_sn(&sn, &left);
    if let Some(ss) = solve(head_sn) {
        return Some(ss);
    }

    let (ss, kb) = {
        let sn_ref = sn.borrow();
        (Rc::clone(&sn_ref.ss), Rc::clone(&sn_ref.kb))
    };
    let tail_sn = make_node(Rc::new(right), kb, ss);
    sn.borrow_mut().tail_sn = Some(Rc::clone(&tail_sn));
    solve(tail_sn)
}

fn ensure_head_sn(
    sn: &Rc<RefCell<SolutionNode>>,
    left: &Term,
) -> Rc<RefCell<SolutionNode>> {
    let mut sn_ref = sn.borrow_mut();
    if sn_ref.head_sn.is_none() {
        let ss = Rc::clone(&sn_ref.ss);
        let kb = Rc::clone(&sn_ref.kb);
        sn_ref.head_sn = Some(make_node(Rc::new(left.clone()), kb, ss));
    }
    sn_ref.head_sn.clone().unwrap()
}
