//! The interactive read-eval-print loop: the outermost collaborator that
//! wires the parser, knowledge base, and resolver together for a human
//! at a terminal.
//!
//! `run` is generic over `BufRead`/`Write` so the command loop itself can
//! be exercised against in-memory buffers instead of real stdio (see the
//! tests module here).

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use log::warn;

use crate::control::{request_stop, set_occurs_check, toggle_occurs_check};
use crate::error::MonologError;
use crate::knowledge_base::KnowledgeBase;
use crate::parser::{parse_program, parse_query};
use crate::resolver::{self, SolutionNode};
use crate::term::Term;

/// One REPL command, parsed from a line of input.
enum Input {
    /// A line with no leading `?-` or `:` command; what it means depends
    /// on the current `Mode` (see `step`).
    Bare(String),
    Query(String),
    Show,
    Clear,
    ToggleOccurs,
    Next,
    Done,
    StoreMode,
    CheckMode,
    Empty,
}

/// Accumulates REPL state across a session: the knowledge base, the
/// current input mode, and — while an answer stream is open — the node
/// the next `:n` resumes.
///
/// `mode` decides what a bare line (no `?-`, no `:` command) means: in
/// `Store` mode it is asserted as a clause; in `Check` mode it is
/// rejected, since the session is meant to be driving queries against a
/// knowledge base already built up, not quietly growing it. A `?-` query
/// works in either mode.
///
/// `kb` is an `Rc` so an open answer stream can share ownership of it
/// with the node tree the resolver builds (see `resolver::SolutionNode`)
/// without borrowing `self`. Mutating commands (`:clear`, asserting a
/// clause) first drop any active stream, which is the only other holder
/// of a clone, so `Rc::get_mut` always succeeds there — exactly the
/// "mutated only between queries" invariant the knowledge base itself
/// documents, enforced structurally rather than by a runtime check.
pub struct Repl {
    kb: Rc<KnowledgeBase>,
    mode: Mode,
    active: Option<(Term, Rc<RefCell<SolutionNode>>)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Store,
    Check,
}

impl Repl {
    pub fn new() -> Repl {
        Repl {
            kb: Rc::new(KnowledgeBase::new()),
            mode: Mode::Check,
            active: None,
        }
    }

    /// Loads a program's clauses into the knowledge base before the
    /// interactive loop starts. Used for the optional program-file
    /// argument.
    pub fn consult(&mut self, source: &str) -> Result<usize, String> {
        let clauses = parse_program(source).map_err(|e| e.to_string())?;
        let count = clauses.len();
        let kb = Rc::get_mut(&mut self.kb).expect("consult() called while a query was active");
        for clause in clauses {
            kb.assert(clause);
        }
        Ok(count)
    }

    /// Runs the loop against arbitrary readers/writers, so tests can
    /// drive it with in-memory buffers instead of real stdio.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            self.step(&line, &mut output)?;
        }
        Ok(())
    }

    fn step<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<()> {
        match classify(line) {
            Input::Empty => Ok(()),
            Input::Show => writeln!(output, "{}", self.kb.snapshot()),
            Input::Clear => {
                self.active = None;
                Rc::get_mut(&mut self.kb)
                    .expect("knowledge base mutated while a query was active")
                    .clear();
                writeln!(output, "knowledge base cleared")
            }
            Input::ToggleOccurs => {
                let on = toggle_occurs_check();
                writeln!(output, "occurs-check: {}", if on { "on" } else { "off" })
            }
            Input::StoreMode => {
                self.mode = Mode::Store;
                writeln!(output, "mode: store")
            }
            Input::CheckMode => {
                self.mode = Mode::Check;
                writeln!(output, "mode: check")
            }
            Input::Next => self.advance(output),
            Input::Done => {
                request_stop();
                self.active = None;
                writeln!(output, "done")
            }
            Input::Bare(text) => match self.mode {
                Mode::Store => self.assert_clause(&text, output),
                Mode::Check => {
                    warn!("bare line rejected outside store mode: {}", text);
                    writeln!(
                        output,
                        "error: not in store mode; use :s or :store to assert clauses, \
                         or prefix a query with ?-"
                    )
                }
            },
            Input::Query(text) => self.start_query(&text, output),
        }
    }

    fn assert_clause<W: Write>(&mut self, text: &str, output: &mut W) -> io::Result<()> {
        match parse_program(text) {
            Ok(clauses) => {
                let count = clauses.len();
                self.active = None;
                let kb = Rc::get_mut(&mut self.kb)
                    .expect("knowledge base mutated while a query was active");
                for clause in clauses {
                    kb.assert(clause);
                }
                writeln!(output, "stored {} clause(s)", count)
            }
            Err(e) => {
                warn!("malformed clause input: {}", e);
                writeln!(output, "error: {}", e)
            }
        }
    }

    fn start_query<W: Write>(&mut self, text: &str, output: &mut W) -> io::Result<()> {
        let goal = match parse_query(text) {
            Ok(goal) => goal,
            Err(e) => {
                warn!("malformed query input: {}", e);
                return writeln!(output, "error: {}", e);
            }
        };
        // A bare variable typed as the whole query (e.g. `?- X.`) is not
        // a callable goal; catch it here rather than let the resolver
        // quietly report it as an ordinary failure.
        if let Term::Var { .. } = goal {
            let e = MonologError::UnboundGoal(goal.to_string());
            warn!("unbound goal in query: {}", e);
            return writeln!(output, "error: {}", e);
        }
        // A fresh `?- goal` line always starts a brand new answer
        // stream, abandoning whatever the previous one had left open.
        let sn = resolver::make_root_node(Rc::new(goal.clone()), Rc::clone(&self.kb));
        self.active = Some((goal, sn));
        self.advance(output)
    }

    fn advance<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        let (query, sn) = match self.active.take() {
            Some(pair) => pair,
            None => return writeln!(output, "no active query"),
        };
        match resolver::solve_next(&query, Rc::clone(&sn)) {
            Some(answer) => {
                let line = if answer.is_empty() { "true" } else { &answer };
                writeln!(output, "{}", line)?;
                self.active = Some((query, sn));
            }
            None => {
                writeln!(output, "false")?;
            }
        }
        Ok(())
    }

    pub fn set_occurs_check(&mut self, on: bool) {
        set_occurs_check(on);
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn mode(&self) -> &str {
        match self.mode {
            Mode::Store => "store",
            Mode::Check => "check",
        }
    }
}

impl Default for Repl {
    fn default() -> Repl {
        Repl::new()
    }
}

fn classify(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed {
        "" => Input::Empty,
        ":show" => Input::Show,
        ":clear" => Input::Clear,
        ":o" | ":occurs" => Input::ToggleOccurs,
        ":s" | ":store" => Input::StoreMode,
        ":c" | ":check" => Input::CheckMode,
        ":n" | ":next" => Input::Next,
        ":d" | ":done" => Input::Done,
        _ if trimmed.starts_with("?-") => {
            Input::Query(trimmed.trim_start_matches("?-").to_string())
        }
        _ => Input::Bare(trimmed.to_string()),
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn run_session(program: &str, lines: &[&str]) -> String {
        let mut repl = Repl::new();
        repl.consult(program).unwrap();
        let input = lines.join("\n");
        let mut out = Vec::new();
        repl.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_query_and_next_answer() {
        let output = run_session(
            "father(tom, bob).\nfather(tom, liz).\n",
            &["?- father(tom, X).", ":n", ":n"],
        );
        assert!(output.contains("X = bob"));
        assert!(output.contains("X = liz"));
        assert!(output.contains("false"));
    }

    #[test]
    fn test_done_stops_the_stream() {
        let output = run_session("p(a).\np(b).\n", &["?- p(X).", ":d"]);
        assert!(output.contains("X = a"));
        assert!(output.contains("done"));
    }

    #[test]
    fn test_show_and_clear() {
        let output = run_session("p(a).\n", &[":show", ":clear", ":show"]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!("p(a).", lines[0]);
        assert_eq!("knowledge base cleared", lines[1]);
        assert_eq!("", lines[2]);
    }

    #[test]
    fn test_store_mode_assert_at_runtime() {
        let output = run_session("", &[":s", "q(a).", "?- q(a)."]);
        assert!(output.contains("stored 1 clause(s)"));
        assert!(output.contains("true"));
    }

    #[test]
    fn test_occurs_toggle_command() {
        let output = run_session("", &[":o", ":o"]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!("occurs-check: on", lines[0]);
        assert_eq!("occurs-check: off", lines[1]);
    }

    #[test]
    fn test_malformed_query_reports_error() {
        let output = run_session("", &["?- p(."]);
        assert!(output.starts_with("error:"));
    }

    #[test]
    fn test_bare_variable_query_reports_unbound_goal() {
        let output = run_session("p(a).\n", &["?- X."]);
        assert!(output.starts_with("error: unbound goal"));
    }

    #[test]
    fn test_done_then_reassert_is_allowed() {
        // :d drops the active stream, so the knowledge base is mutable
        // again immediately afterward.
        let output = run_session("p(a).\n", &["?- p(X).", ":d", ":s", "q(b).", "?- q(b)."]);
        assert!(output.contains("done"));
        assert!(output.contains("true"));
    }

    #[test]
    fn test_check_mode_rejects_bare_line() {
        let output = run_session("p(a).\n", &["q(b).", "?- p(a)."]);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("error:"));
        assert_eq!("true", lines[1]);
    }
}
