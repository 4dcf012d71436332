//! Process-wide switches read by the unifier and resolver.
//!
//! Three pieces of state live here, each a single global: the next logic
//! variable id, the next scope id, and two cooperative flags (occurs-check
//! and done/stop). None of them are touched concurrently — Monolog is
//! single-threaded and cooperative (see the resolver) — so plain `static
//! mut` guarded by small accessor functions is enough; no locking is
//! needed and none is used.

static mut NEXT_VAR_ID: usize = 0;
static mut NEXT_SCOPE_ID: u64 = 1; // 0 is reserved for the query itself.
static mut OCCURS_CHECK: bool = false;
static mut STOP_REQUESTED: bool = false;

/// Returns a fresh, globally unique variable id.
pub fn next_var_id() -> usize {
    unsafe {
        let id = NEXT_VAR_ID;
        NEXT_VAR_ID += 1;
        id
    }
}

/// Returns a fresh scope id for one clause instantiation.
pub fn next_scope_id() -> u64 {
    unsafe {
        let id = NEXT_SCOPE_ID;
        NEXT_SCOPE_ID += 1;
        id
    }
}

/// Resets the id counters. Called once per top-level query so that scope
/// ids stay small and readable; query variables keep scope 0 regardless.
pub fn reset_for_query() {
    unsafe {
        NEXT_VAR_ID = 0;
        NEXT_SCOPE_ID = 1;
        STOP_REQUESTED = false;
    }
}

/// Returns the current occurs-check setting.
pub fn occurs_check_enabled() -> bool {
    unsafe { OCCURS_CHECK }
}

/// Flips the occurs-check setting. Only valid between queries (see
/// `:o`/`:occurs` in the REPL command surface); toggling while an answer
/// stream is suspended is a misuse the REPL must not allow.
pub fn toggle_occurs_check() -> bool {
    unsafe {
        OCCURS_CHECK = !OCCURS_CHECK;
        OCCURS_CHECK
    }
}

pub fn set_occurs_check(on: bool) {
    unsafe {
        OCCURS_CHECK = on;
    }
}

/// Signals the resolver to release all choice points on its next step.
/// This is the `:d`/`:done` REPL command's only effect on the core; there
/// are no timeouts, so this is the sole way a search is cut short.
pub fn request_stop() {
    unsafe {
        STOP_REQUESTED = true;
    }
}

/// True once `request_stop` has been called for the current query.
pub fn stop_requested() -> bool {
    unsafe { STOP_REQUESTED }
}

#[cfg(test)]
mod test {

    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_var_id_counter() {
        reset_for_query();
        assert_eq!(0, next_var_id());
        assert_eq!(1, next_var_id());
        assert_eq!(2, next_var_id());
    }

    #[test]
    #[serial]
    fn test_scope_id_counter() {
        reset_for_query();
        assert_eq!(1, next_scope_id());
        assert_eq!(2, next_scope_id());
    }

    #[test]
    #[serial]
    fn test_occurs_check_toggle() {
        set_occurs_check(false);
        assert_eq!(false, occurs_check_enabled());
        assert_eq!(true, toggle_occurs_check());
        assert_eq!(true, occurs_check_enabled());
        set_occurs_check(false);
    }

    #[test]
    #[serial]
    fn test_stop_flag() {
        reset_for_query();
        assert_eq!(false, stop_requested());
        request_stop();
        assert_eq!(true, stop_requested());
        reset_for_query();
        assert_eq!(false, stop_requested());
    }
}
