//! Data models module
//!
//! Defines core data structures:
//! - PermissionRecord: one decoded TCC grant or denial
//! - PermissionSource: which store a record came from
//! - PermissionQueryResult: per-store records and failures for one app

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::constants::FULL_DISK_ACCESS_SERVICE;

pub mod mappings;

pub use mappings::{
    friendly_reason_text, friendly_service_name, status_color, status_text, DisplayColor,
};

/// Which TCC store produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionSource {
    /// Per-user store under the home directory
    User,
    /// System-wide store, requires Full Disk Access
    System,
}

impl PermissionSource {
    /// Badge label shown next to a record
    pub fn label(&self) -> &'static str {
        match self {
            PermissionSource::User => "USER",
            PermissionSource::System => "SYSTEM",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            PermissionSource::User => DisplayColor::Blue,
            PermissionSource::System => DisplayColor::Purple,
        }
    }
}

impl std::fmt::Display for PermissionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionSource::User => write!(f, "User"),
            PermissionSource::System => write!(f, "System"),
        }
    }
}

/// A single permission entry decoded from a TCC store
#[derive(Debug, Clone)]
pub struct PermissionRecord {
    /// Surrogate identity for list rendering; carries no meaning
    pub id: Uuid,
    /// Service identifier, verbatim from the store
    pub service: String,
    /// Status code (see `mappings::AUTH_STATUSES`)
    pub auth_value: i64,
    /// How the status was established, if recorded
    pub auth_reason: Option<i64>,
    /// When the entry last changed, if recorded
    pub last_modified: Option<DateTime<Utc>>,
    /// Store this record was read from
    pub source: PermissionSource,
}

impl PermissionRecord {
    /// Build a record with a fresh surrogate identity
    pub fn new(
        service: String,
        auth_value: i64,
        auth_reason: Option<i64>,
        last_modified: Option<DateTime<Utc>>,
        source: PermissionSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            service,
            auth_value,
            auth_reason,
            last_modified,
            source,
        }
    }

    pub fn display_name(&self) -> String {
        friendly_service_name(&self.service)
    }

    pub fn status_text(&self) -> String {
        status_text(self.auth_value)
    }

    pub fn status_color(&self) -> DisplayColor {
        status_color(self.auth_value)
    }

    /// Reason phrase, or `None` when the store recorded no reason
    pub fn reason_text(&self) -> Option<String> {
        self.auth_reason.map(friendly_reason_text)
    }

    /// True for allowed, limited, one-time and system-allowed grants
    pub fn is_granted(&self) -> bool {
        mappings::GRANTED_AUTH_VALUES.contains(&self.auth_value)
    }
}

/// Records and failures from both stores for one application.
///
/// An errored source and an empty source are different states: the first
/// has `*_error` set, the second has an empty record list and no error.
#[derive(Debug, Clone, Default)]
pub struct PermissionQueryResult {
    pub user_records: Vec<PermissionRecord>,
    pub system_records: Vec<PermissionRecord>,
    pub user_error: Option<String>,
    pub system_error: Option<String>,
}

impl PermissionQueryResult {
    pub fn has_user_records(&self) -> bool {
        !self.user_records.is_empty()
    }

    pub fn has_system_records(&self) -> bool {
        !self.system_records.is_empty()
    }

    pub fn has_any_records(&self) -> bool {
        self.has_user_records() || self.has_system_records()
    }

    /// Records from both sources sorted by display name.
    ///
    /// The sort is stable, so records sharing a name keep user-before-system order.
    pub fn all_records(&self) -> Vec<&PermissionRecord> {
        let mut combined: Vec<&PermissionRecord> = self
            .user_records
            .iter()
            .chain(self.system_records.iter())
            .collect();
        combined.sort_by_cached_key(|record| record.display_name());
        combined
    }

    /// Error message for a source, if its query failed
    pub fn error_for(&self, source: PermissionSource) -> Option<&str> {
        match source {
            PermissionSource::User => self.user_error.as_deref(),
            PermissionSource::System => self.system_error.as_deref(),
        }
    }

    pub fn records_for(&self, source: PermissionSource) -> &[PermissionRecord] {
        match source {
            PermissionSource::User => &self.user_records,
            PermissionSource::System => &self.system_records,
        }
    }

    /// Whether the system store records a Full Disk Access grant.
    ///
    /// `None` when the system store could not be read.
    pub fn full_disk_access(&self) -> Option<bool> {
        if self.system_error.is_some() {
            return None;
        }
        Some(
            self.system_records
                .iter()
                .any(|r| r.service == FULL_DISK_ACCESS_SERVICE && r.is_granted()),
        )
    }

    /// Drop records that fail `keep`, leaving errors untouched
    pub fn retain_records<F>(&mut self, keep: F)
    where
        F: Fn(&PermissionRecord) -> bool,
    {
        self.user_records.retain(|r| keep(r));
        self.system_records.retain(|r| keep(r));
    }
}
