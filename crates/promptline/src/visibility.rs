//! The suspend/resume state machine.
//!
//! Visibility of the prompt is derived from a nesting counter, not a
//! boolean: asynchronous producers may hide/show from nested or overlapping
//! call sites, and only the outermost pair may touch the terminal. The
//! counter answers one question per call, namely whether it crossed the
//! 0↔1 boundary, and the session performs capture/restore work only on
//! those crossings.
//!
//! The types here are pure state so the nesting invariants can be tested
//! without a terminal, an editor, or a lock.

/// What a `hide`/`show` call did to the visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Depth went 0 → 1: the prompt's footprint must be captured and
    /// removed from the terminal.
    BecameHidden,
    /// Depth went 1 → 0: the prompt's footprint must be restored and input
    /// reading resumed.
    BecameVisible,
    /// The call only adjusted the counter (or was a saturated no-op).
    Unchanged,
}

/// Nesting counter for the prompt's visibility.
///
/// Invariant: the prompt is visually hidden iff `depth > 0`. `show` at
/// depth 0 saturates instead of underflowing, which makes an extra `show`
/// harmless by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityCounter {
    depth: u32,
}

impl VisibilityCounter {
    /// A counter starting visible (depth 0).
    #[must_use]
    pub const fn visible() -> Self {
        Self { depth: 0 }
    }

    /// A counter starting hidden at depth 1. Sessions are constructed in
    /// this state and brought on-screen by their initial `show`.
    #[must_use]
    pub const fn hidden() -> Self {
        Self { depth: 1 }
    }

    /// Record a hide call.
    pub const fn hide(&mut self) -> Transition {
        self.depth += 1;
        if self.depth == 1 {
            Transition::BecameHidden
        } else {
            Transition::Unchanged
        }
    }

    /// Record a show call. Saturates at depth 0.
    pub const fn show(&mut self) -> Transition {
        if self.depth == 0 {
            return Transition::Unchanged;
        }
        self.depth -= 1;
        if self.depth == 0 {
            Transition::BecameVisible
        } else {
            Transition::Unchanged
        }
    }

    /// Whether the prompt is currently off-screen.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.depth > 0
    }

    /// The current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }
}

/// Snapshot of the editor's live state, captured on the transition into the
/// first hide and consumed on the transition out of the last show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The live edit buffer at capture time.
    pub buffer: String,
    /// The cursor position at capture time.
    pub cursor: usize,
}

impl Snapshot {
    /// Create a snapshot.
    #[must_use]
    pub const fn new(buffer: String, cursor: usize) -> Self {
        Self { buffer, cursor }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn starts_visible() {
        let counter = VisibilityCounter::visible();
        assert!(!counter.is_hidden());
        assert_eq!(counter.depth(), 0);
    }

    #[test]
    fn hidden_constructor_needs_one_show() {
        let mut counter = VisibilityCounter::hidden();
        assert!(counter.is_hidden());
        assert_eq!(counter.show(), Transition::BecameVisible);
        assert!(!counter.is_hidden());
    }

    #[test]
    fn first_hide_transitions() {
        let mut counter = VisibilityCounter::visible();
        assert_eq!(counter.hide(), Transition::BecameHidden);
        assert!(counter.is_hidden());
    }

    #[test]
    fn nested_hides_collapse() {
        let mut counter = VisibilityCounter::visible();
        assert_eq!(counter.hide(), Transition::BecameHidden);
        assert_eq!(counter.hide(), Transition::Unchanged);
        assert_eq!(counter.hide(), Transition::Unchanged);
        assert_eq!(counter.depth(), 3);

        assert_eq!(counter.show(), Transition::Unchanged);
        assert_eq!(counter.show(), Transition::Unchanged);
        assert_eq!(counter.show(), Transition::BecameVisible);
        assert!(!counter.is_hidden());
    }

    #[test]
    fn extra_show_saturates() {
        let mut counter = VisibilityCounter::visible();
        assert_eq!(counter.show(), Transition::Unchanged);
        assert_eq!(counter.depth(), 0);

        counter.hide();
        counter.show();
        assert_eq!(counter.show(), Transition::Unchanged);
        assert_eq!(counter.depth(), 0);
    }

    proptest! {
        /// For any call sequence, the prompt is hidden iff the running
        /// (saturated) net hide count is positive, and transitions fire
        /// exactly on the 0↔1 crossings.
        #[test]
        fn nesting_balance(calls in proptest::collection::vec(any::<bool>(), 0..256)) {
            let mut counter = VisibilityCounter::visible();
            let mut model: u32 = 0;
            for is_hide in calls {
                let before = model;
                let transition = if is_hide {
                    model += 1;
                    counter.hide()
                } else {
                    model = model.saturating_sub(1);
                    counter.show()
                };
                prop_assert_eq!(counter.depth(), model);
                prop_assert_eq!(counter.is_hidden(), model > 0);
                let expected = match (before, model) {
                    (0, 1) => Transition::BecameHidden,
                    (1, 0) => Transition::BecameVisible,
                    _ => Transition::Unchanged,
                };
                prop_assert_eq!(transition, expected);
            }
        }

        /// N nested hides then N shows yield exactly one capture transition
        /// and one restore transition.
        #[test]
        fn single_transition_per_outer_pair(n in 1u32..64) {
            let mut counter = VisibilityCounter::visible();
            let captures = (0..n)
                .filter(|_| counter.hide() == Transition::BecameHidden)
                .count();
            let restores = (0..n)
                .filter(|_| counter.show() == Transition::BecameVisible)
                .count();
            prop_assert_eq!(captures, 1);
            prop_assert_eq!(restores, 1);
            prop_assert!(!counter.is_hidden());
        }
    }
}
