//! The knowledge base: an ordered collection of clauses addressable by
//! functor name/arity, mutated only between queries.
//!
//! A master ordered `Vec<Clause>` is the source of truth for both
//! iteration and `snapshot()` order, with a secondary
//! `HashMap<String, Vec<usize>>` index into it bucketed by `name/arity`,
//! so `iter(name, arity)` stays close to O(1) per bucket lookup without
//! sacrificing global insertion order across predicates.

use std::collections::HashMap;
use std::fmt;

use crate::clause::Clause;
use log::debug;

#[derive(Debug, Default)]
pub struct KnowledgeBase {
    clauses: Vec<Clause>,
    index: HashMap<String, Vec<usize>>,
}

impl KnowledgeBase {
    pub fn new() -> KnowledgeBase {
        KnowledgeBase {
            clauses: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends a clause to the ordered sequence. No duplicate detection.
    pub fn assert(&mut self, clause: Clause) {
        let key = clause.key();
        debug!("asserting clause {} (key {})", clause, key);
        let position = self.clauses.len();
        self.clauses.push(clause);
        self.index.entry(key).or_insert_with(Vec::new).push(position);
    }

    /// Empties the knowledge base.
    pub fn clear(&mut self) {
        debug!("clearing knowledge base ({} clauses)", self.clauses.len());
        self.clauses.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Produces clauses in insertion order matching the given functor
    /// signature.
    pub fn iter(&self, name: &str, arity: usize) -> impl Iterator<Item = &Clause> {
        let key = format!("{}/{}", name, arity);
        let positions: &[usize] = self.index.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        positions.iter().map(move |&i| &self.clauses[i])
    }

    /// The number of clauses matching a given functor signature; used by
    /// the resolver to size its clause cursor.
    pub fn count(&self, name: &str, arity: usize) -> usize {
        let key = format!("{}/{}", name, arity);
        self.index.get(&key).map(Vec::len).unwrap_or(0)
    }

    /// Returns the `index`th clause (in insertion order) matching a
    /// functor signature, if any. Used by the resolver to step through a
    /// predicate's clause list one candidate at a time.
    pub fn nth(&self, name: &str, arity: usize, index: usize) -> Option<&Clause> {
        let key = format!("{}/{}", name, arity);
        let positions = self.index.get(&key)?;
        let position = *positions.get(index)?;
        Some(&self.clauses[position])
    }

    /// A textual rendering of all clauses, one per line, in insertion
    /// order.
    pub fn snapshot(&self) -> String {
        self.clauses
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}
