//! # window-engine
//!
//! Date-window consistency checks for content forms.
//!
//! Events, consultations, notices, radio posts and archives each carry one or
//! more named date windows (publish, application, event). This crate enforces
//! the ordering and containment rules between those windows, reports each
//! failure against the field that should display it, understands the
//! "unlimited end" sentinel, and converts between the local wall-clock values
//! forms edit and the absolute timestamps storage keeps.
//!
//! ## Modules
//!
//! - [`bridge`]: local wall-clock string ↔ absolute RFC 3339 timestamp
//! - [`sentinel`]: the reserved "no end date" value
//! - [`compare`]: resolved bounds and their ordering
//! - [`constraint`]: windows, fields and per-content-type rule tables
//! - [`validator`]: evaluate a rule table against window values
//! - [`state`]: per-form holder that revalidates on every edit
//! - [`config`]: offset and sentinel settings
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use window_engine::{ContentType, FieldId, Snapshot, ValidationState, WindowName};
//!
//! let mut state = ValidationState::new(ContentType::Notice.constraints());
//! state.update(
//!     Snapshot::new()
//!         .set(FieldId::start(WindowName::Publish), "2024-01-10T09:00")
//!         .set(FieldId::end(WindowName::Publish), "2024-01-05T09:00"),
//! );
//! assert!(state.has_errors());
//! assert_eq!(
//!     state.error_for(FieldId::end(WindowName::Publish)),
//!     Some("publish.end must not be before publish.start"),
//! );
//! ```

pub mod bridge;
pub mod compare;
pub mod config;
pub mod constraint;
pub mod error;
pub mod sentinel;
pub mod state;
pub mod validator;

pub use bridge::TimeZoneBridge;
pub use compare::{Point, RangeComparator};
pub use config::Settings;
pub use constraint::{
    Blame, Bound, Constraint, ConstraintSet, ContentType, FieldId, Window, WindowName, Windows,
};
pub use error::WindowError;
pub use sentinel::{SentinelPolicy, UNLIMITED_YEAR};
pub use state::{
    any_errors, FormatError, Phase, Snapshot, StoredWindow, StoredWindows, ValidationState,
};
pub use validator::{validate, Validator, Violation, ViolationKind};
