//! Evaluates a [`ConstraintSet`] against resolved window values.
//!
//! Validation is a pure function of its inputs: the same set and windows
//! always yield the same violations, in rule declaration order.

use serde::Serialize;

use crate::compare::RangeComparator;
use crate::constraint::{Blame, Constraint, ConstraintSet, FieldId, Window, WindowName, Windows};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// Two fields are out of sequence.
    Ordering,
    /// An inner window extends past its outer window.
    Containment,
}

/// A failed rule, attributed to the field that should display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: FieldId,
    pub kind: ViolationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    comparator: RangeComparator,
}

impl Validator {
    /// Check every rule of `set` against `windows`.
    ///
    /// Windows missing from the map count as empty. Absent bounds never
    /// produce a violation.
    ///
    /// # Panics
    ///
    /// Panics if `windows` holds a window that `set` does not declare.
    pub fn validate(&self, set: &ConstraintSet, windows: &Windows) -> Vec<Violation> {
        for &window in windows.keys() {
            set.assert_declared(window);
        }

        let mut violations = Vec::new();
        for constraint in set.constraints() {
            match *constraint {
                Constraint::Ordering {
                    earlier,
                    later,
                    blame,
                } => self.check_ordering(windows, earlier, later, blame, &mut violations),
                Constraint::Containment { outer, inner } => {
                    self.check_containment(windows, outer, inner, &mut violations)
                }
            }
        }
        violations
    }

    fn check_ordering(
        &self,
        windows: &Windows,
        earlier: FieldId,
        later: FieldId,
        blame: Blame,
        out: &mut Vec<Violation>,
    ) {
        let a = resolve(windows, earlier.window).bound(earlier.bound);
        let b = resolve(windows, later.window).bound(later.bound);
        if !self.comparator.is_after(a, b) {
            return;
        }

        if matches!(blame, Blame::Earlier | Blame::Both) {
            out.push(Violation {
                field: earlier,
                kind: ViolationKind::Ordering,
                message: format!("{earlier} must not be after {later}"),
            });
        }
        if matches!(blame, Blame::Later | Blame::Both) {
            out.push(Violation {
                field: later,
                kind: ViolationKind::Ordering,
                message: format!("{later} must not be before {earlier}"),
            });
        }
    }

    fn check_containment(
        &self,
        windows: &Windows,
        outer: WindowName,
        inner: WindowName,
        out: &mut Vec<Violation>,
    ) {
        let outer_window = resolve(windows, outer);
        let inner_window = resolve(windows, inner);
        if !outer_window.has_any_bound() || !inner_window.has_any_bound() {
            return;
        }

        if self.comparator.is_after(outer_window.start, inner_window.start) {
            let field = FieldId::start(inner);
            out.push(Violation {
                field,
                kind: ViolationKind::Containment,
                message: format!("{field} must not be before {}", FieldId::start(outer)),
            });
        }
        if self.comparator.is_after(inner_window.end, outer_window.end) {
            let field = FieldId::end(inner);
            out.push(Violation {
                field,
                kind: ViolationKind::Containment,
                message: format!("{field} must not be after {}", FieldId::end(outer)),
            });
        }
    }
}

/// Validate with the default comparator.
pub fn validate(set: &ConstraintSet, windows: &Windows) -> Vec<Violation> {
    Validator::default().validate(set, windows)
}

fn resolve(windows: &Windows, name: WindowName) -> Window {
    windows.get(&name).copied().unwrap_or_default()
}
