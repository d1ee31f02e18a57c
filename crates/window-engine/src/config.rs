//! Runtime settings: the application's UTC offset and the reserved sentinel year.

use serde::{Deserialize, Serialize};

use crate::bridge::TimeZoneBridge;
use crate::error::Result;
use crate::sentinel::{SentinelPolicy, UNLIMITED_YEAR};

/// Deserializable settings. Missing keys fall back to the defaults
/// (`"+09:00"`, `2200`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed offset of the application's zone, e.g. `"+09:00"`.
    pub utc_offset: String,
    /// Year whose values mean "no end date".
    pub sentinel_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            utc_offset: "+09:00".to_string(),
            sentinel_year: UNLIMITED_YEAR,
        }
    }
}

impl Settings {
    pub fn bridge(&self) -> Result<TimeZoneBridge> {
        TimeZoneBridge::from_offset_str(&self.utc_offset)
    }

    pub fn sentinel(&self) -> Result<SentinelPolicy> {
        SentinelPolicy::new(self.sentinel_year)
    }
}
