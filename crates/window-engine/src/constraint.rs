//! Windows, fields and the per-content-type rule tables.
//!
//! A [`ConstraintSet`] is plain data: the windows a form declares, which of
//! them accept an unlimited end, and an ordered list of [`Constraint`]s. New
//! content types are added by declaring a table in [`ContentType::constraints`],
//! not by writing comparison code.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compare::Point;
use crate::error::WindowError;

// ── Names ───────────────────────────────────────────────────────────────────

/// A temporal phase of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowName {
    /// When the item is visible.
    Publish,
    /// When sign-up or registration is open.
    Application,
    /// When the event itself takes place.
    Event,
}

impl WindowName {
    pub const ALL: [WindowName; 3] = [Self::Publish, Self::Application, Self::Event];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Application => "application",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for WindowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowName {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s.trim())
            .ok_or_else(|| WindowError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Start,
    End,
}

impl Bound {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// One input of a form: a window bound, displayed as `publish.end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldId {
    pub window: WindowName,
    pub bound: Bound,
}

impl FieldId {
    pub const fn new(window: WindowName, bound: Bound) -> Self {
        Self { window, bound }
    }

    pub const fn start(window: WindowName) -> Self {
        Self::new(window, Bound::Start)
    }

    pub const fn end(window: WindowName) -> Self {
        Self::new(window, Bound::End)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.window, self.bound.as_str())
    }
}

impl FromStr for FieldId {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || WindowError::UnknownField(s.to_string());
        let (window, bound) = s.trim().split_once('.').ok_or_else(unknown)?;
        let window = window.parse::<WindowName>().map_err(|_| unknown())?;
        let bound = match bound {
            "start" => Bound::Start,
            "end" => Bound::End,
            _ => return Err(unknown()),
        };
        Ok(Self::new(window, bound))
    }
}

impl TryFrom<String> for FieldId {
    type Error = WindowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldId> for String {
    fn from(field: FieldId) -> Self {
        field.to_string()
    }
}

// ── Window values ───────────────────────────────────────────────────────────

/// Resolved bounds of one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl Window {
    pub fn new(start: Option<Point>, end: Option<Point>) -> Self {
        Self { start, end }
    }

    pub fn bound(&self, bound: Bound) -> Option<Point> {
        match bound {
            Bound::Start => self.start,
            Bound::End => self.end,
        }
    }

    /// True when at least one bound is set.
    pub fn has_any_bound(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// Snapshot of every window's resolved bounds. Missing entries are empty windows.
pub type Windows = BTreeMap<WindowName, Window>;

// ── Constraints ─────────────────────────────────────────────────────────────

/// Which side of a failed ordering rule carries the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Blame {
    Earlier,
    Later,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "lowercase")]
pub enum Constraint {
    /// `earlier` must not be after `later`.
    Ordering {
        earlier: FieldId,
        later: FieldId,
        blame: Blame,
    },
    /// `outer.start <= inner.start` and `inner.end <= outer.end`; failures
    /// are attributed to the inner field.
    Containment {
        outer: WindowName,
        inner: WindowName,
    },
}

impl Constraint {
    pub const fn ordering(earlier: FieldId, later: FieldId, blame: Blame) -> Self {
        Self::Ordering {
            earlier,
            later,
            blame,
        }
    }

    /// `window.start <= window.end`, reported against the end field.
    pub const fn window_order(window: WindowName) -> Self {
        Self::ordering(FieldId::start(window), FieldId::end(window), Blame::Later)
    }

    pub const fn containment(outer: WindowName, inner: WindowName) -> Self {
        Self::Containment { outer, inner }
    }

    /// Windows this rule reads.
    pub fn windows(&self) -> [WindowName; 2] {
        match *self {
            Self::Ordering { earlier, later, .. } => [earlier.window, later.window],
            Self::Containment { outer, inner } => [outer, inner],
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordering { earlier, later, .. } => write!(f, "{earlier} <= {later}"),
            Self::Containment { outer, inner } => write!(f, "{outer} contains {inner}"),
        }
    }
}

// ── Content types ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Event,
    Consultation,
    Notice,
    Radio,
    Archive,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        Self::Event,
        Self::Consultation,
        Self::Notice,
        Self::Radio,
        Self::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Consultation => "consultation",
            Self::Notice => "notice",
            Self::Radio => "radio",
            Self::Archive => "archive",
        }
    }

    /// The rule table for this content type.
    pub fn constraints(self) -> ConstraintSet {
        use WindowName::{Application, Event, Publish};

        match self {
            // Event dates are deliberately left independent of the
            // publish and application windows.
            Self::Event => ConstraintSet::new(
                self.as_str(),
                &[Publish, Application, Event],
                &[Publish, Application],
                vec![
                    Constraint::window_order(Publish),
                    Constraint::window_order(Application),
                    Constraint::window_order(Event),
                    Constraint::containment(Publish, Application),
                ],
            ),
            Self::Consultation => ConstraintSet::new(
                self.as_str(),
                &[Publish, Application],
                &[Publish, Application],
                vec![
                    Constraint::window_order(Publish),
                    Constraint::window_order(Application),
                    Constraint::containment(Publish, Application),
                ],
            ),
            Self::Notice | Self::Radio | Self::Archive => ConstraintSet::new(
                self.as_str(),
                &[Publish],
                &[Publish],
                vec![Constraint::window_order(Publish)],
            ),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| WindowError::UnknownContentType(s.to_string()))
    }
}

// ── ConstraintSet ───────────────────────────────────────────────────────────

/// The immutable rule table for one form type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintSet {
    name: String,
    windows: Vec<WindowName>,
    unlimited: Vec<WindowName>,
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// Declare a rule table.
    ///
    /// # Panics
    ///
    /// Panics if a constraint or an unlimited window refers to a window not
    /// listed in `windows`. Rule tables are static declarations, so this is
    /// a programming error.
    pub fn new(
        name: impl Into<String>,
        windows: &[WindowName],
        unlimited: &[WindowName],
        constraints: Vec<Constraint>,
    ) -> Self {
        let name = name.into();
        for window in unlimited {
            assert!(
                windows.contains(window),
                "constraint set `{name}`: unlimited window `{window}` is not declared"
            );
        }
        for constraint in &constraints {
            for window in constraint.windows() {
                assert!(
                    windows.contains(&window),
                    "constraint set `{name}`: rule `{constraint}` refers to undeclared window `{window}`"
                );
            }
        }
        Self {
            name,
            windows: windows.to_vec(),
            unlimited: unlimited.to_vec(),
            constraints,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared windows, in declaration order.
    pub fn windows(&self) -> &[WindowName] {
        &self.windows
    }

    /// Rules, in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn declares(&self, window: WindowName) -> bool {
        self.windows.contains(&window)
    }

    pub fn supports_unlimited(&self, window: WindowName) -> bool {
        self.unlimited.contains(&window)
    }

    /// Every field of every declared window, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.windows
            .iter()
            .flat_map(|&w| [FieldId::start(w), FieldId::end(w)])
    }

    /// Fail fast on a field the form does not declare.
    pub(crate) fn assert_declared(&self, window: WindowName) {
        assert!(
            self.declares(window),
            "window `{window}` is not declared by constraint set `{}`",
            self.name
        );
    }
}
