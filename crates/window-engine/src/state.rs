//! Per-form validation state.
//!
//! A [`ValidationState`] holds the latest local value of every field a form
//! declares, plus the unlimited toggle of each window that supports one. Every
//! [`update`](ValidationState::update) re-runs the validator over the merged
//! values and replaces the error lists wholesale. Subscribers are only called
//! when the lists actually changed.
//!
//! A state belongs to one form. Nested sub-forms each own their own state and
//! the parent combines them with [`any_errors`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bridge::{format_absolute, parse_absolute, TimeZoneBridge};
use crate::compare::Point;
use crate::config::Settings;
use crate::constraint::{ConstraintSet, FieldId, Window, WindowName, Windows};
use crate::error::{Result, WindowError};
use crate::sentinel::SentinelPolicy;
use crate::validator::{Validator, Violation};

/// A field whose value could not be read as a date.
///
/// Kept apart from [`Violation`]s: the field takes no part in ordering checks
/// until it parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatError {
    pub field: FieldId,
    pub message: String,
}

/// A partial set of edits. Only the fields and toggles present are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Local values; `None` or a blank string clears the field.
    pub values: BTreeMap<FieldId, Option<String>>,
    pub unlimited: BTreeMap<WindowName, bool>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.values.insert(field, Some(value.into()));
        self
    }

    pub fn clear(mut self, field: FieldId) -> Self {
        self.values.insert(field, None);
        self
    }

    pub fn set_unlimited(mut self, window: WindowName, unlimited: bool) -> Self {
        self.unlimited.insert(window, unlimited);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.unlimited.is_empty()
    }
}

/// Absolute bounds of one window as exchanged with storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredWindow {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub type StoredWindows = BTreeMap<WindowName, StoredWindow>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No user edit yet.
    Clean,
    /// At least one edit; validation runs on every change.
    Dirty,
}

type Listener = Box<dyn FnMut(&[Violation], &[FormatError])>;

pub struct ValidationState {
    set: ConstraintSet,
    bridge: TimeZoneBridge,
    sentinel: SentinelPolicy,
    validator: Validator,
    values: BTreeMap<FieldId, String>,
    unlimited: BTreeMap<WindowName, bool>,
    phase: Phase,
    violations: Vec<Violation>,
    invalid: Vec<FormatError>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationState")
            .field("set", &self.set.name())
            .field("phase", &self.phase)
            .field("values", &self.values)
            .field("unlimited", &self.unlimited)
            .field("violations", &self.violations)
            .field("invalid", &self.invalid)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl ValidationState {
    /// A state using the default offset (UTC+9) and sentinel year (2200).
    pub fn new(set: ConstraintSet) -> Self {
        Self::with_parts(set, TimeZoneBridge::default(), SentinelPolicy::default())
    }

    /// # Errors
    ///
    /// Returns an error if `settings` holds an invalid offset or sentinel year.
    pub fn with_settings(set: ConstraintSet, settings: &Settings) -> Result<Self> {
        Ok(Self::with_parts(set, settings.bridge()?, settings.sentinel()?))
    }

    pub fn with_parts(set: ConstraintSet, bridge: TimeZoneBridge, sentinel: SentinelPolicy) -> Self {
        Self {
            set,
            bridge,
            sentinel,
            validator: Validator::default(),
            values: BTreeMap::new(),
            unlimited: BTreeMap::new(),
            phase: Phase::Clean,
            violations: Vec::new(),
            invalid: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn constraint_set(&self) -> &ConstraintSet {
        &self.set
    }

    pub fn bridge(&self) -> TimeZoneBridge {
        self.bridge
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current local value of `field`, if set.
    pub fn value(&self, field: FieldId) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_unlimited(&self, window: WindowName) -> bool {
        self.unlimited.get(&window).copied().unwrap_or(false)
    }

    /// Register a consumer called with the new error lists whenever they change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Violation], &[FormatError]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Merge `snapshot` into the current values and revalidate.
    ///
    /// Returns `true` if subscribers were notified, i.e. the error lists differ
    /// from the previous ones.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot names a window the constraint set does not
    /// declare, or toggles unlimited on a window that does not support it.
    pub fn update(&mut self, snapshot: Snapshot) -> bool {
        for (field, value) in snapshot.values {
            self.set.assert_declared(field.window);
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                Some(v) => {
                    self.values.insert(field, v.to_string());
                }
                None => {
                    self.values.remove(&field);
                }
            }
        }
        for (window, on) in snapshot.unlimited {
            assert!(
                self.set.supports_unlimited(window),
                "window `{window}` of constraint set `{}` has no unlimited end",
                self.set.name()
            );
            if on {
                self.unlimited.insert(window, true);
            } else {
                self.unlimited.remove(&window);
            }
        }
        self.phase = Phase::Dirty;
        self.recompute()
    }

    /// Seed the state from stored absolute values.
    ///
    /// Each stored window replaces the current values of that window. An end
    /// whose local rendering falls in the sentinel year becomes the unlimited
    /// toggle when the window supports one. Values that are not RFC 3339 are kept verbatim and show up as
    /// format errors. Hydrating is not a user edit and leaves the phase as is.
    ///
    /// # Panics
    ///
    /// Panics if `stored` holds a window the constraint set does not declare.
    pub fn hydrate(&mut self, stored: &StoredWindows) -> bool {
        for (&window, bounds) in stored {
            self.set.assert_declared(window);
            self.seed(FieldId::start(window), bounds.start.as_deref());

            let end_is_sentinel = bounds
                .end
                .as_deref()
                .and_then(|raw| parse_absolute(raw).ok())
                .is_some_and(|instant| {
                    self.bridge.instant_point(instant, &self.sentinel) == Point::Unlimited
                });
            if end_is_sentinel && self.set.supports_unlimited(window) {
                self.unlimited.insert(window, true);
                self.values.remove(&FieldId::end(window));
            } else {
                self.unlimited.remove(&window);
                self.seed(FieldId::end(window), bounds.end.as_deref());
            }
        }
        self.recompute()
    }

    /// Violations from the last recomputation, in rule declaration order.
    pub fn errors(&self) -> &[Violation] {
        &self.violations
    }

    /// Fields whose value could not be parsed.
    pub fn format_errors(&self) -> &[FormatError] {
        &self.invalid
    }

    pub fn has_errors(&self) -> bool {
        !self.violations.is_empty() || !self.invalid.is_empty()
    }

    /// Message to display next to `field`, if any. A format error takes
    /// precedence over a violation.
    pub fn error_for(&self, field: FieldId) -> Option<&str> {
        self.invalid
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
            .or_else(|| {
                self.violations
                    .iter()
                    .find(|v| v.field == field)
                    .map(|v| v.message.as_str())
            })
    }

    /// Current values resolved to absolute instants. Unreadable fields are absent.
    pub fn windows(&self) -> Windows {
        self.resolve().0
    }

    /// Absolute values for storage, one entry per declared window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Blocked`] while any violation or format error
    /// is outstanding.
    pub fn to_stored(&self) -> Result<StoredWindows> {
        if self.has_errors() {
            return Err(WindowError::Blocked {
                errors: self.violations.len() + self.invalid.len(),
            });
        }

        let mut stored = StoredWindows::new();
        for &window in self.set.windows() {
            let start = self.stored_value(FieldId::start(window))?;
            let end = if self.is_unlimited(window) {
                Some(self.absolute(Point::Unlimited))
            } else {
                self.stored_value(FieldId::end(window))?
            };
            stored.insert(window, StoredWindow { start, end });
        }
        Ok(stored)
    }

    // ── internals ───────────────────────────────────────────────────────

    fn seed(&mut self, field: FieldId, absolute: Option<&str>) {
        let Some(raw) = absolute.map(str::trim).filter(|v| !v.is_empty()) else {
            self.values.remove(&field);
            return;
        };
        let local = self.bridge.to_local(raw).unwrap_or_else(|err| {
            debug!(field = %field, error = %err, "stored value is not an absolute timestamp");
            raw.to_string()
        });
        self.values.insert(field, local);
    }

    fn absolute(&self, point: Point) -> String {
        match point {
            Point::At(instant) => format_absolute(&instant),
            Point::Unlimited => format_absolute(&self.sentinel.unlimited_value()),
        }
    }

    fn stored_value(&self, field: FieldId) -> Result<Option<String>> {
        self.values
            .get(&field)
            .map(|raw| {
                let point = self.bridge.read_point(raw, &self.sentinel)?;
                Ok(self.absolute(point))
            })
            .transpose()
    }

    fn resolve_field(&self, field: FieldId, invalid: &mut Vec<FormatError>) -> Option<Point> {
        let raw = self.values.get(&field)?;
        match self.bridge.read_point(raw, &self.sentinel) {
            Ok(point) => Some(point),
            Err(err) => {
                debug!(field = %field, error = %err, "unreadable date value");
                invalid.push(FormatError {
                    field,
                    message: format!("{field} has an invalid date format: '{raw}'"),
                });
                None
            }
        }
    }

    fn resolve(&self) -> (Windows, Vec<FormatError>) {
        let mut invalid = Vec::new();
        let mut windows = Windows::new();
        for &name in self.set.windows() {
            let start = self.resolve_field(FieldId::start(name), &mut invalid);
            let end = if self.is_unlimited(name) {
                Some(Point::Unlimited)
            } else {
                self.resolve_field(FieldId::end(name), &mut invalid)
            };
            windows.insert(name, Window::new(start, end));
        }
        (windows, invalid)
    }

    fn recompute(&mut self) -> bool {
        let (windows, invalid) = self.resolve();
        let violations = self.validator.validate(&self.set, &windows);
        debug!(
            set = self.set.name(),
            violations = violations.len(),
            invalid = invalid.len(),
            "date windows revalidated"
        );

        if violations == self.violations && invalid == self.invalid {
            trace!(set = self.set.name(), "errors unchanged, notification suppressed");
            return false;
        }

        self.violations = violations;
        self.invalid = invalid;
        for listener in &mut self.listeners {
            listener(&self.violations, &self.invalid);
        }
        true
    }
}

/// True if any of the independently owned states has errors.
pub fn any_errors<'a>(states: impl IntoIterator<Item = &'a ValidationState>) -> bool {
    states.into_iter().any(ValidationState::has_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ContentType;
    use crate::constraint::WindowName::{Application, Event, Publish};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn notice() -> ValidationState {
        ValidationState::new(ContentType::Notice.constraints())
    }

    fn event() -> ValidationState {
        ValidationState::new(ContentType::Event.constraints())
    }

    /// Subscribe a counter and return it.
    fn count_notifications(state: &mut ValidationState) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let handle = Rc::clone(&count);
        state.subscribe(move |_, _| *handle.borrow_mut() += 1);
        count
    }

    // ── update ──────────────────────────────────────────────────────────

    #[test]
    fn test_new_state_is_clean() {
        let state = notice();
        assert_eq!(state.phase(), Phase::Clean);
        assert!(!state.has_errors());
        assert!(state.errors().is_empty());
    }

    #[test]
    fn test_update_marks_dirty() {
        let mut state = notice();
        state.update(Snapshot::new().set(FieldId::start(Publish), "2024-01-10T09:00"));
        assert_eq!(state.phase(), Phase::Dirty);
        assert_eq!(state.value(FieldId::start(Publish)), Some("2024-01-10T09:00"));
    }

    #[test]
    fn test_update_merges_partial_snapshots() {
        let mut state = notice();
        state.update(Snapshot::new().set(FieldId::start(Publish), "2024-01-10T09:00"));
        assert!(!state.has_errors());
        state.update(Snapshot::new().set(FieldId::end(Publish), "2024-01-05T09:00"));
        assert_eq!(state.errors().len(), 1);
        assert_eq!(
            state.error_for(FieldId::end(Publish)),
            Some("publish.end must not be before publish.start")
        );
        assert_eq!(state.error_for(FieldId::start(Publish)), None);
    }

    #[test]
    fn test_snapshot_is_empty() {
        assert!(Snapshot::new().is_empty());
        assert!(!Snapshot::new().clear(FieldId::end(Publish)).is_empty());
        assert!(!Snapshot::new().set_unlimited(Publish, false).is_empty());
    }

    #[test]
    fn test_blank_value_clears_field() {
        let mut state = notice();
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-10T09:00")
                .set(FieldId::end(Publish), "2024-01-05T09:00"),
        );
        assert!(state.has_errors());
        state.update(Snapshot::new().set(FieldId::end(Publish), "   "));
        assert_eq!(state.value(FieldId::end(Publish)), None);
        assert!(!state.has_errors());
        state.update(Snapshot::new().clear(FieldId::start(Publish)));
        assert_eq!(state.value(FieldId::start(Publish)), None);
    }

    #[test]
    #[should_panic(expected = "window `event` is not declared by constraint set `notice`")]
    fn test_update_undeclared_field_panics() {
        notice().update(Snapshot::new().set(FieldId::start(Event), "2024-01-10T09:00"));
    }

    #[test]
    #[should_panic(expected = "window `event` of constraint set `event` has no unlimited end")]
    fn test_unlimited_on_unsupported_window_panics() {
        event().update(Snapshot::new().set_unlimited(Event, true));
    }

    // ── notifications ───────────────────────────────────────────────────

    #[test]
    fn test_identical_snapshot_does_not_renotify() {
        let mut state = notice();
        let count = count_notifications(&mut state);
        let snapshot = Snapshot::new()
            .set(FieldId::start(Publish), "2024-01-10T09:00")
            .set(FieldId::end(Publish), "2024-01-05T09:00");

        assert!(state.update(snapshot.clone()));
        let first = state.errors().as_ptr();
        assert!(!state.update(snapshot));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(state.errors().as_ptr(), first);
    }

    #[test]
    fn test_changed_errors_renotify() {
        let mut state = notice();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.subscribe(move |violations, _| sink.borrow_mut().push(violations.len()));

        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-10T09:00")
                .set(FieldId::end(Publish), "2024-01-05T09:00"),
        );
        // a different value with the same violation is not a change
        state.update(Snapshot::new().set(FieldId::end(Publish), "2024-01-06T09:00"));
        state.update(Snapshot::new().set(FieldId::end(Publish), "2024-01-20T09:00"));

        assert_eq!(*seen.borrow(), vec![1, 0]);
    }

    #[test]
    fn test_clean_edits_do_not_notify() {
        let mut state = notice();
        let count = count_notifications(&mut state);
        state.update(Snapshot::new().set(FieldId::start(Publish), "2024-01-10T09:00"));
        state.update(Snapshot::new().set(FieldId::end(Publish), "2024-01-20T09:00"));
        assert_eq!(*count.borrow(), 0);
    }

    // ── format errors ───────────────────────────────────────────────────

    #[test]
    fn test_unparseable_value_is_format_error_not_violation() {
        let mut state = notice();
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "next tuesday")
                .set(FieldId::end(Publish), "2024-01-05T09:00"),
        );
        assert!(state.errors().is_empty());
        assert_eq!(state.format_errors().len(), 1);
        assert_eq!(state.format_errors()[0].field, FieldId::start(Publish));
        assert!(state.has_errors());
        let message = state.error_for(FieldId::start(Publish)).unwrap();
        assert!(message.contains("invalid date format"), "got: {message}");
    }

    #[test]
    fn test_format_error_takes_precedence_in_error_for() {
        let mut state = event();
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-01")
                .set(FieldId::end(Publish), "2024-01-31")
                .set(FieldId::start(Application), "2024-01-05")
                .set(FieldId::end(Application), "2024-02-01"),
        );
        assert!(state.error_for(FieldId::end(Application)).unwrap().contains("after"));

        state.update(Snapshot::new().set(FieldId::end(Application), "02/01/2024"));
        assert!(state.errors().is_empty());
        assert!(state
            .error_for(FieldId::end(Application))
            .unwrap()
            .contains("invalid date format"));
    }

    // ── unlimited ───────────────────────────────────────────────────────

    #[test]
    fn test_unlimited_toggle_replaces_end() {
        let mut state = notice();
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-10T09:00")
                .set(FieldId::end(Publish), "2024-01-05T09:00"),
        );
        assert!(state.has_errors());

        state.update(Snapshot::new().set_unlimited(Publish, true));
        assert!(state.is_unlimited(Publish));
        assert!(!state.has_errors());
        // the typed value survives so turning the toggle off restores it
        assert_eq!(state.value(FieldId::end(Publish)), Some("2024-01-05T09:00"));

        state.update(Snapshot::new().set_unlimited(Publish, false));
        assert!(state.has_errors());
    }

    #[test]
    fn test_typed_reserved_year_counts_as_unlimited() {
        let mut state = event();
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-01T00:00")
                .set(FieldId::end(Publish), "2200-01-01T00:00")
                .set(FieldId::start(Application), "2024-01-05T00:00")
                .set(FieldId::end(Application), "2199-12-31T23:59"),
        );
        assert!(!state.has_errors());
        assert_eq!(state.windows()[&Publish].end, Some(Point::Unlimited));
    }

    // ── hydrate / to_stored ─────────────────────────────────────────────

    fn stored(start: Option<&str>, end: Option<&str>) -> StoredWindow {
        StoredWindow {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn test_hydrate_converts_to_local_and_stays_clean() {
        let mut state = notice();
        let mut input = StoredWindows::new();
        input.insert(
            Publish,
            stored(Some("2024-01-10T00:00:00Z"), Some("2024-01-31T15:00:00Z")),
        );
        state.hydrate(&input);

        assert_eq!(state.phase(), Phase::Clean);
        assert_eq!(state.value(FieldId::start(Publish)), Some("2024-01-10T09:00"));
        assert_eq!(state.value(FieldId::end(Publish)), Some("2024-02-01T00:00"));
        assert!(!state.has_errors());
    }

    #[test]
    fn test_hydrate_sentinel_sets_toggle() {
        let mut state = notice();
        let mut input = StoredWindows::new();
        input.insert(
            Publish,
            stored(Some("2024-01-10T00:00:00Z"), Some("2200-12-31T00:00:00Z")),
        );
        state.hydrate(&input);
        assert!(state.is_unlimited(Publish));
        assert_eq!(state.value(FieldId::end(Publish)), None);
    }

    #[test]
    fn test_hydrate_sentinel_on_window_without_toggle_keeps_value() {
        let mut state = event();
        let mut input = StoredWindows::new();
        input.insert(Event, stored(None, Some("2200-12-31T00:00:00Z")));
        state.hydrate(&input);
        assert!(!state.is_unlimited(Event));
        assert_eq!(state.value(FieldId::end(Event)), Some("2200-12-31T09:00"));
    }

    #[test]
    fn test_hydrate_bad_value_surfaces_format_error() {
        let mut state = notice();
        let count = count_notifications(&mut state);
        let mut input = StoredWindows::new();
        input.insert(Publish, stored(Some("garbage"), None));
        assert!(state.hydrate(&input));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(state.format_errors()[0].field, FieldId::start(Publish));
    }

    #[test]
    fn test_to_stored_converts_to_absolute() {
        let mut state = event();
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-01T09:00")
                .set_unlimited(Publish, true)
                .set(FieldId::start(Event), "2024-03-02 18:30"),
        );
        let out = state.to_stored().unwrap();
        assert_eq!(
            out[&Publish],
            stored(Some("2024-01-01T00:00:00Z"), Some("2200-12-31T00:00:00Z"))
        );
        assert_eq!(out[&Application], stored(None, None));
        assert_eq!(out[&Event], stored(Some("2024-03-02T09:30:00Z"), None));
    }

    #[test]
    fn test_to_stored_blocked_while_errors() {
        let mut state = notice();
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-10T09:00")
                .set(FieldId::end(Publish), "bad"),
        );
        assert_eq!(state.to_stored(), Err(WindowError::Blocked { errors: 1 }));
    }

    #[test]
    fn test_hydrate_then_store_round_trips() {
        let mut state = event();
        let mut input = StoredWindows::new();
        input.insert(
            Publish,
            stored(Some("2024-01-01T00:00:00Z"), Some("2200-12-31T00:00:00Z")),
        );
        input.insert(
            Application,
            stored(Some("2024-01-05T00:00:00Z"), Some("2024-01-20T00:00:00Z")),
        );
        input.insert(Event, stored(None, None));
        state.hydrate(&input);
        assert_eq!(state.to_stored().unwrap(), input);
    }

    // ── settings / aggregation ──────────────────────────────────────────

    #[test]
    fn test_with_settings_uses_offset() {
        let settings = Settings {
            utc_offset: "Z".to_string(),
            ..Settings::default()
        };
        let mut state =
            ValidationState::with_settings(ContentType::Archive.constraints(), &settings).unwrap();
        assert_eq!(state.bridge().offset_string(), "+00:00");
        assert_eq!(state.constraint_set().name(), "archive");
        state.update(Snapshot::new().set(FieldId::start(Publish), "2024-01-10T09:00"));
        assert_eq!(
            state.to_stored().unwrap()[&Publish].start.as_deref(),
            Some("2024-01-10T09:00:00Z")
        );
    }

    // ── negative offsets near the sentinel year ─────────────────────────

    fn notice_at(offset: &str) -> ValidationState {
        let settings = Settings {
            utc_offset: offset.to_string(),
            ..Settings::default()
        };
        ValidationState::with_settings(ContentType::Notice.constraints(), &settings).unwrap()
    }

    #[test]
    fn test_late_december_before_sentinel_year_is_ordered() {
        // both values are already 2200 in UTC at -05:00
        let mut state = notice_at("-05:00");
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2199-12-31T19:30")
                .set(FieldId::end(Publish), "2199-12-31T19:10"),
        );
        assert_eq!(
            state.error_for(FieldId::end(Publish)),
            Some("publish.end must not be before publish.start")
        );
    }

    #[test]
    fn test_late_december_value_survives_storage_round_trip() {
        let mut state = notice_at("-05:00");
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2199-12-01T00:00")
                .set(FieldId::end(Publish), "2199-12-31T20:00"),
        );
        let out = state.to_stored().unwrap();
        assert_eq!(out[&Publish].end.as_deref(), Some("2200-01-01T01:00:00Z"));

        let mut restored = notice_at("-05:00");
        restored.hydrate(&out);
        assert!(!restored.is_unlimited(Publish));
        assert_eq!(restored.value(FieldId::end(Publish)), Some("2199-12-31T20:00"));
        assert_eq!(restored.to_stored().unwrap(), out);
    }

    #[test]
    fn test_sentinel_round_trips_at_negative_offset() {
        let mut state = notice_at("-12:00");
        state.update(
            Snapshot::new()
                .set(FieldId::start(Publish), "2024-01-01T00:00")
                .set_unlimited(Publish, true),
        );
        let out = state.to_stored().unwrap();
        assert_eq!(out[&Publish].end.as_deref(), Some("2200-12-31T00:00:00Z"));

        let mut restored = notice_at("-12:00");
        restored.hydrate(&out);
        assert!(restored.is_unlimited(Publish));
        assert_eq!(restored.value(FieldId::end(Publish)), None);
    }

    #[test]
    fn test_any_errors_is_logical_or() {
        let mut parent = event();
        let mut child = ValidationState::new(ContentType::Consultation.constraints());
        assert!(!any_errors([&parent, &child]));

        child.update(
            Snapshot::new()
                .set(FieldId::start(Application), "2024-02-01")
                .set(FieldId::end(Application), "2024-01-01"),
        );
        assert!(any_errors([&parent, &child]));
        assert!(!parent.has_errors());

        parent.update(Snapshot::new().set(FieldId::start(Publish), "2024-01-01"));
        assert!(any_errors(vec![&parent, &child]));
    }
}
