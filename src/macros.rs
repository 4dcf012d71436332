//! Ergonomic constructors for building terms and clauses directly in
//! Rust, without going through the parser. Used by this crate's own
//! tests and benchmark, and available to downstream consumers.

/// Builds a `Term::Atom`.
#[macro_export]
macro_rules! atom {
    ($name:expr) => {
        $crate::term::Term::Atom($name.to_string())
    };
}

/// Builds a scope-0 `Term::Var`, as if it had just come out of the
/// parser.
#[macro_export]
macro_rules! var {
    ($name:expr) => {
        $crate::term::Term::var($name, 0)
    };
}

/// Builds a `Term::NumLit`.
#[macro_export]
macro_rules! num {
    ($n:expr) => {
        $crate::term::Term::NumLit($n)
    };
}

/// Builds a `Term::TextLit`.
#[macro_export]
macro_rules! text {
    ($s:expr) => {
        $crate::term::Term::TextLit($s.to_string())
    };
}

/// Builds a `Term::Compound` from a name and an argument list.
#[macro_export]
macro_rules! compound {
    ($name:expr $(, $arg:expr)* $(,)?) => {
        $crate::term::Term::Compound($name.to_string(), vec![$($arg),*])
    };
}

/// Builds a `Clause::Fact`.
#[macro_export]
macro_rules! fact {
    ($head:expr) => {
        $crate::clause::Clause::fact($head)
    };
}

/// Builds a `Clause::Rule`.
#[macro_export]
macro_rules! rule {
    ($head:expr, $body:expr) => {
        $crate::clause::Clause::rule($head, $body)
    };
}

#[cfg(test)]
mod test {

    use crate::clause::Clause;
    use crate::term::Term;

    #[test]
    fn test_atom_and_compound_macros() {
        let t = compound!("father", atom!("tom"), var!("X"));
        assert_eq!(
            Term::Compound(
                "father".to_string(),
                vec![Term::Atom("tom".to_string()), Term::var("X", 0)],
            ),
            t
        );
    }

    #[test]
    fn test_fact_and_rule_macros() {
        let f = fact!(compound!("male", atom!("tom")));
        assert!(matches!(f, Clause::Fact(_)));

        let r = rule!(
            compound!("grandparent", var!("X"), var!("Y")),
            compound!("parent", var!("X"), var!("Y"))
        );
        assert!(matches!(r, Clause::Rule(_, _)));
    }
}
