//! The resolver: goal-directed search over the knowledge base.
//!
//! A tree of `SolutionNode`s linked by `head_sn`/`tail_sn`/`child`; each
//! call to `next_solution` advances the search by exactly one answer.
//! `Term` already carries `Compound`/`Negation`/`Conjunction`/
//! `Disjunction`/`Var`, so one `next_solution` dispatches structurally on
//! the walked goal's shape directly, with no separate goal/operator type
//! to bridge.
//!
//! There are no query timeouts; a non-terminating query is only ever cut
//! short by a cooperative stop signal (`control::stop_requested`), which
//! the REPL's `:d`/`:done` command raises.

mod and_or;

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::clause::Clause;
use crate::control::{next_scope_id, reset_for_query, stop_requested};
use crate::knowledge_base::KnowledgeBase;
use crate::renamer::rename_clause;
use crate::substitution::Substitution;
use crate::term::{resolve, walk, Term};
use crate::unifier::unify;

use and_or::{next_solution_and, next_solution_or};

/// One node of the search tree. A node is built for a single goal under a
/// single incoming substitution; repeated calls to `next_solution` walk
/// it forward, producing the backtracking sequence of answers.
///
/// `kb` is an `Rc` rather than a borrow: a node tree's lifetime is driven
/// by the REPL one answer at a time, interleaved with knowledge-base
/// reads (`:show`) on the very same owner, which a borrowed `&'a
/// KnowledgeBase` cannot express without a lifetime tying the owner to
/// every node it ever spawned. Cloning an `Rc` is cheap and the
/// knowledge base itself is never mutated while a node tree is alive.
pub struct SolutionNode {
    goal: Rc<Term>,
    kb: Rc<KnowledgeBase>,
    ss: Rc<Substitution>,

    /// Predicate goals: index of the next candidate clause to try.
    rule_index: usize,
    /// Predicate goals, rule bodies only: the child node solving the
    /// matched clause's body, cached so repeated calls resume it instead
    /// of re-matching the clause.
    child: Option<Rc<RefCell<SolutionNode>>>,

    /// Conjunction/Disjunction: the node solving the left operand.
    head_sn: Option<Rc<RefCell<SolutionNode>>>,
    /// Conjunction/Disjunction: the node solving the remainder, cached so
    /// repeated calls resume it before retrying the left operand.
    tail_sn: Option<Rc<RefCell<SolutionNode>>>,
}

/// Builds a solution node for `goal` under `ss`, against `kb`.
pub fn make_node(
    goal: Rc<Term>,
    kb: Rc<KnowledgeBase>,
    ss: Rc<Substitution>,
) -> Rc<RefCell<SolutionNode>> {
    Rc::new(RefCell::new(SolutionNode {
        goal,
        kb,
        ss,
        rule_index: 0,
        child: None,
        head_sn: None,
        tail_sn: None,
    }))
}

/// Builds the root node for a brand-new top-level query, resetting the
/// id/scope counters and the done flag (the query itself runs at scope 0;
/// every renamed clause it selects gets scope 1, 2, 3, ...).
pub fn make_root_node(goal: Rc<Term>, kb: Rc<KnowledgeBase>) -> Rc<RefCell<SolutionNode>> {
    reset_for_query();
    make_node(goal, kb, Rc::new(Substitution::new()))
}

/// Advances the search by one step, returning the next substitution, or
/// `None` once the search beneath this node is exhausted or the consumer
/// has signaled `:d`/`:done`.
pub fn next_solution(sn: Rc<RefCell<SolutionNode>>) -> Option<Rc<Substitution>> {
    if stop_requested() {
        return None;
    }

    let walked_goal = {
        let sn_ref = sn.borrow();
        walk(&sn_ref.goal, &sn_ref.ss)
    };

    match walked_goal {
        Term::Compound(name, args) => next_solution_predicate(sn, name, args),
        Term::Conjunction(l, r) => next_solution_and(sn, *l, *r, next_solution),
        Term::Disjunction(l, r) => next_solution_or(sn, *l, *r, next_solution),
        Term::Negation(inner) => next_solution_negation(sn, *inner),
        // An unbound variable used in goal position: "not a callable
        // goal", section 4.4. Reported as failure, not a crash.
        Term::Var { .. } => None,
        // Atoms, numbers, and text are never callable; a parser producing
        // a bare goal atom always emits a zero-arity Compound instead
        // (section 10), so reaching this arm means a non-callable term
        // was used as a goal directly.
        _ => None,
    }
}

fn next_solution_predicate(
    sn: Rc<RefCell<SolutionNode>>,
    name: String,
    args: Vec<Term>,
) -> Option<Rc<Substitution>> {
    let arity = args.len();
    let goal_term = Term::Compound(name.clone(), args);

    // Resume a cached child (the in-progress body of a previously
    // matched rule) before trying further clauses.
    let cached_child = sn.borrow().child.clone();
    if let Some(child) = cached_child {
        if let Some(ss) = next_solution(child) {
            return Some(ss);
        }
        sn.borrow_mut().child = None;
    }

    loop {
        if stop_requested() {
            return None;
        }

        let (rule_index, ss, kb) = {
            let sn_ref = sn.borrow();
            (sn_ref.rule_index, Rc::clone(&sn_ref.ss), Rc::clone(&sn_ref.kb))
        };

        let clause: Clause = match kb.nth(&name, arity, rule_index) {
            None => return None, // no more matching clauses
            Some(c) => c.clone(),
        };
        sn.borrow_mut().rule_index += 1;

        let scope = next_scope_id();
        let renamed = rename_clause(&clause, scope);
        trace!("trying clause {} at scope {}", renamed, scope);

        let unified = match unify(&goal_term, renamed.head(), &ss) {
            None => continue,
            Some(new_ss) => new_ss,
        };

        match renamed.body() {
            None => return Some(Rc::new(unified)), // fact: yield directly
            Some(body) => {
                let kb = Rc::clone(&sn.borrow().kb);
                let child = make_node(Rc::new(body.clone()), kb, Rc::new(unified));
                sn.borrow_mut().child = Some(Rc::clone(&child));
                if let Some(ss) = next_solution(child) {
                    return Some(ss);
                }
                sn.borrow_mut().child = None;
                // This clause's body is exhausted; try the next clause.
            }
        }
    }
}

fn next_solution_negation(
    sn: Rc<RefCell<SolutionNode>>,
    inner: Term,
) -> Option<Rc<Substitution>> {
    // Negation yields at most one answer. `rule_index` doubles here as a
    // "already answered" marker, since a Negation node never iterates
    // clauses of its own.
    let already_answered = sn.borrow().rule_index > 0;
    if already_answered {
        return None;
    }
    sn.borrow_mut().rule_index = 1;

    let (ss, kb) = {
        let sn_ref = sn.borrow();
        (Rc::clone(&sn_ref.ss), Rc::clone(&sn_ref.kb))
    };

    // Bindings made while proving the inner goal are discarded regardless
    // of outcome: a fresh node is solved against a clone of ss and then
    // thrown away, never written back into this node's ss.
    let inner_node = make_node(Rc::new(inner), kb, Rc::clone(&ss));
    match next_solution(inner_node) {
        Some(_) => None,  // inner goal is provable: negation fails
        None => Some(ss), // inner goal has no proof: negation succeeds once
    }
}

/// Drives a node forward once and formats the result for display,
/// mirroring the `solve`/`format_solution` entry points used by the
/// teacher's REPL, minus the timeout.
pub fn solve_next(
    query: &Term,
    sn: Rc<RefCell<SolutionNode>>,
) -> Option<String> {
    next_solution(sn).map(|ss| format_answer(query, &ss))
}

/// Collects every answer eagerly. Only sound to call on queries known to
/// terminate; provided for tests and the benchmark, not the REPL (which
/// must honor `:n`/`:d` one answer at a time).
pub fn solve_all(query: &Term, sn: Rc<RefCell<SolutionNode>>) -> Vec<String> {
    let mut answers = Vec::new();
    loop {
        match next_solution(Rc::clone(&sn)) {
            None => return answers,
            Some(ss) => answers.push(format_answer(query, &ss)),
        }
    }
}

/// Renders one answer as `Name = term, Name2 = term2, ...` for every
/// distinct, non-wildcard variable appearing in the original query, in
/// first-occurrence order. Matches the output contract in section 6.
pub fn format_answer(query: &Term, ss: &Substitution) -> String {
    let mut seen: Vec<(String, usize, bool)> = Vec::new();
    collect_vars(query, &mut seen);

    let parts: Vec<String> = seen
        .iter()
        .filter(|(_, _, anonymous)| !anonymous)
        .map(|(name, id, _)| {
            let var = Term::Var {
                name: name.clone(),
                scope: 0,
                id: *id,
                anonymous: false,
            };
            format!("{} = {}", name, resolve(&var, ss))
        })
        .collect();

    parts.join(", ")
}

fn collect_vars(term: &Term, out: &mut Vec<(String, usize, bool)>) {
    match term {
        Term::Var { name, id, anonymous, .. } => {
            if !out.iter().any(|(_, existing, _)| existing == id) {
                out.push((name.clone(), *id, *anonymous));
            }
        }
        Term::Compound(_, args) => {
            for a in args {
                collect_vars(a, out);
            }
        }
        Term::Negation(inner) => collect_vars(inner, out),
        Term::Conjunction(l, r) | Term::Disjunction(l, r) => {
            collect_vars(l, out);
            collect_vars(r, out);
        }
        _ => {}
    }
}
