//! Subcommand implementations.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};
use window_engine::{
    ContentType, Constraint, FormatError, Settings, Snapshot, ValidationState, Violation,
};

/// Settings from `--config`, with `--offset` applied on top.
pub fn load_settings(config: Option<&Path>, offset: Option<&str>) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings from {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(offset) = offset {
        settings.utc_offset = offset.to_string();
    }
    debug!(
        utc_offset = %settings.utc_offset,
        sentinel_year = settings.sentinel_year,
        "settings loaded"
    );
    Ok(settings)
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    content_type: ContentType,
    has_errors: bool,
    violations: &'a [Violation],
    invalid: &'a [FormatError],
}

/// Validate a snapshot and print the report. Returns whether errors were found.
pub fn run_validate(
    content_type: ContentType,
    input: Option<&Path>,
    settings: &Settings,
) -> Result<bool> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read snapshot from stdin")?;
            buf
        }
    };
    let snapshot: Snapshot = serde_json::from_str(&raw).context("invalid snapshot JSON")?;
    if snapshot.is_empty() {
        warn!(content_type = %content_type, "snapshot sets no fields or toggles");
    }

    let mut state = ValidationState::with_settings(content_type.constraints(), settings)?;
    let set = state.constraint_set();
    for field in snapshot.values.keys() {
        if !set.declares(field.window) {
            bail!("field `{field}` is not part of a {content_type} form");
        }
    }
    for window in snapshot.unlimited.keys() {
        if !set.supports_unlimited(*window) {
            bail!("window `{window}` of a {content_type} form has no unlimited end");
        }
    }

    state.update(snapshot);
    info!(
        content_type = %content_type,
        violations = state.errors().len(),
        invalid = state.format_errors().len(),
        "snapshot validated"
    );

    let report = ValidationReport {
        content_type,
        has_errors: state.has_errors(),
        violations: state.errors(),
        invalid: state.format_errors(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.has_errors)
}

pub fn run_to_absolute(local: &str, settings: &Settings) -> Result<()> {
    let bridge = settings.bridge()?;
    println!("{}", bridge.to_absolute(local)?);
    Ok(())
}

pub fn run_to_local(absolute: &str, settings: &Settings) -> Result<()> {
    let bridge = settings.bridge()?;
    println!("{}", bridge.to_local(absolute)?);
    Ok(())
}

pub fn run_rules(content_type: ContentType) -> Result<()> {
    let set = content_type.constraints();
    let windows: Vec<String> = set
        .windows()
        .iter()
        .map(|&w| {
            if set.supports_unlimited(w) {
                format!("{w} (unlimited end allowed)")
            } else {
                w.to_string()
            }
        })
        .collect();

    println!("{content_type}");
    println!("  windows: {}", windows.join(", "));
    for constraint in set.constraints() {
        let kind = match constraint {
            Constraint::Ordering { .. } => "ordering",
            Constraint::Containment { .. } => "containment",
        };
        println!("  {kind:<12} {constraint}");
    }
    Ok(())
}
