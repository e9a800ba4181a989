//! Output formatting module
//!
//! Handles:
//! - Report structures shared by human and JSON output
//! - Human-readable permission listings
//! - JSON serialization of the full report
//! - Summary statistics

use std::fmt::Write as _;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use tccinspect::bundle::AppTarget;
use tccinspect::models::{DisplayColor, PermissionQueryResult, PermissionRecord, PermissionSource};

/// One permission as presented to users
#[derive(Debug, Clone, Serialize)]
pub struct PermissionEntry {
    pub service: String,
    pub display_name: String,
    pub source: PermissionSource,
    pub auth_value: i64,
    pub status: String,
    pub status_color: DisplayColor,
    pub auth_reason: Option<i64>,
    pub reason: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl From<&PermissionRecord> for PermissionEntry {
    fn from(record: &PermissionRecord) -> Self {
        Self {
            service: record.service.clone(),
            display_name: record.display_name(),
            source: record.source,
            auth_value: record.auth_value,
            status: record.status_text(),
            status_color: record.status_color(),
            auth_reason: record.auth_reason,
            reason: record.reason_text(),
            last_modified: record.last_modified,
        }
    }
}

/// Outcome of one store: its records, or why it could not be read
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub records: Vec<PermissionEntry>,
    pub error: Option<String>,
}

/// Permissions for one target application
#[derive(Debug, Clone, Serialize)]
pub struct AppPermissionReport {
    pub bundle_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_path: Option<String>,
    pub user: SourceReport,
    pub system: SourceReport,
    /// Both sources combined, sorted by display name
    pub permissions: Vec<PermissionEntry>,
    /// `None` when the system store could not be read
    pub full_disk_access: Option<bool>,
}

impl AppPermissionReport {
    pub fn new(target: &AppTarget, result: &PermissionQueryResult) -> Self {
        let source_report = |source: PermissionSource| SourceReport {
            records: result.records_for(source).iter().map(PermissionEntry::from).collect(),
            error: result.error_for(source).map(str::to_string),
        };

        Self {
            bundle_identifier: target.bundle_identifier.clone(),
            app_name: target.app_name.clone(),
            app_path: target.app_path.as_ref().map(|p| p.display().to_string()),
            user: source_report(PermissionSource::User),
            system: source_report(PermissionSource::System),
            permissions: result.all_records().into_iter().map(PermissionEntry::from).collect(),
            full_disk_access: result.full_disk_access(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(&self.bundle_identifier)
    }

    fn source(&self, source: PermissionSource) -> &SourceReport {
        match source {
            PermissionSource::User => &self.user,
            PermissionSource::System => &self.system,
        }
    }
}

/// Summary statistics for the whole invocation
#[derive(Debug, Clone, Serialize)]
pub struct InspectSummary {
    /// Number of targets queried
    pub targets: usize,
    /// Targets with at least one record
    pub with_permissions: usize,
    /// Records across all targets and sources
    pub total_records: usize,
    /// Targets whose user store query failed
    pub user_errors: usize,
    /// Targets whose system store query failed
    pub system_errors: usize,
    pub duration_ms: u64,
}

/// Complete output structure for JSON serialization
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub results: Vec<AppPermissionReport>,
    pub summary: InspectSummary,
}

impl InspectOutput {
    pub fn new(results: Vec<AppPermissionReport>, duration_ms: u64) -> Self {
        let summary = InspectSummary {
            targets: results.len(),
            with_permissions: results.iter().filter(|r| !r.permissions.is_empty()).count(),
            total_records: results.iter().map(|r| r.permissions.len()).sum(),
            user_errors: results.iter().filter(|r| r.user.error.is_some()).count(),
            system_errors: results.iter().filter(|r| r.system.error.is_some()).count(),
            duration_ms,
        };
        Self { results, summary }
    }
}

/// Format output as pretty-printed JSON
pub fn format_json(output: &InspectOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Format a timestamp in local time
pub fn format_timestamp(timestamp: &DateTime<Utc>, date_format: &str) -> String {
    timestamp.with_timezone(&Local).format(date_format).to_string()
}

/// Format output in human-readable form.
///
/// Store errors are listed separately from the empty state unless
/// `show_errors` is false.
pub fn format_human(output: &InspectOutput, date_format: &str, show_errors: bool) -> String {
    let mut text = String::new();

    for report in &output.results {
        format_report(&mut text, report, date_format, show_errors);
        text.push('\n');
    }

    let summary = &output.summary;
    let _ = writeln!(text, "Summary:");
    let _ = writeln!(text, "  Targets: {}", summary.targets);
    let _ = writeln!(text, "  With permissions: {}", summary.with_permissions);
    let _ = writeln!(text, "  Records: {}", summary.total_records);
    if summary.user_errors > 0 {
        let _ = writeln!(text, "  User store errors: {}", summary.user_errors);
    }
    if summary.system_errors > 0 {
        let _ = writeln!(text, "  System store errors: {}", summary.system_errors);
    }

    let duration_sec = summary.duration_ms as f64 / 1000.0;
    if duration_sec < 1.0 {
        let _ = writeln!(text, "  Duration: {}ms", summary.duration_ms);
    } else {
        let _ = writeln!(text, "  Duration: {:.2}s", duration_sec);
    }

    text
}

fn format_report(text: &mut String, report: &AppPermissionReport, date_format: &str, show_errors: bool) {
    if report.app_name.is_some() {
        let _ = writeln!(
            text,
            "Permissions for {} ({}):",
            report.display_name(),
            report.bundle_identifier
        );
    } else {
        let _ = writeln!(text, "Permissions for {}:", report.bundle_identifier);
    }

    if report.permissions.is_empty() {
        let _ = writeln!(text, "  No permissions found");
    } else {
        let name_width = report
            .permissions
            .iter()
            .map(|p| p.display_name.chars().count())
            .max()
            .unwrap_or(0);

        for entry in &report.permissions {
            let badge = format!("[{}]", entry.source.label());
            let _ = writeln!(
                text,
                "  {:<name_width$}  {:<8}  {}",
                entry.display_name,
                badge,
                entry.status,
                name_width = name_width
            );
            if let Some(reason) = &entry.reason {
                let _ = writeln!(text, "      Previous action: {}", reason);
            }
            if let Some(modified) = &entry.last_modified {
                let _ = writeln!(text, "      Last modified: {}", format_timestamp(modified, date_format));
            }
        }
    }

    if show_errors {
        for source in [PermissionSource::User, PermissionSource::System] {
            if let Some(error) = &report.source(source).error {
                let _ = writeln!(text, "  {} store unavailable: {}", source, error);
            }
        }
    }
}
