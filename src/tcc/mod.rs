//! TCC store query module
//!
//! Handles:
//! - Opening the user and system TCC stores read-only
//! - Running one parameterized query per store for a bundle identifier
//! - Decoding rows into `PermissionRecord`s without per-row failures
//! - Merging both outcomes, including partial failures, into one result

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, Row};
use thiserror::Error;

use crate::constants::{CLIENT_TYPE_BUNDLE_ID, SYSTEM_TCC_STORE_PATH, TCC_STORE_RELATIVE_PATH};
use crate::models::{PermissionQueryResult, PermissionRecord, PermissionSource};

pub mod filter;

/// Columns are selected by name so schema additions cannot reorder them,
/// and a removed column fails at prepare time.
const ACCESS_QUERY: &str = "SELECT service, auth_value, auth_reason, last_modified \
     FROM access \
     WHERE client_type = ?1 AND client = ?2 \
     ORDER BY service ASC";

/// Failures while reading a single TCC store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Missing, unreadable, locked or corrupt store file
    #[error("Failed to open TCC database: {0}")]
    OpenFailed(String),
    /// The query does not fit the store's actual schema
    #[error("Failed to prepare query: {0}")]
    QueryPreparationFailed(String),
}

/// Locations of the two stores consulted for every query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocations {
    pub user: PathBuf,
    pub system: PathBuf,
}

impl StoreLocations {
    /// The fixed per-user and system-wide store paths.
    ///
    /// If the home directory cannot be determined the user path is left
    /// relative, which fails to open and is reported as a user-store error.
    pub fn standard() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self {
            user: home.join(TCC_STORE_RELATIVE_PATH),
            system: PathBuf::from(SYSTEM_TCC_STORE_PATH),
        }
    }

    pub fn path_for(&self, source: PermissionSource) -> &Path {
        match source {
            PermissionSource::User => &self.user,
            PermissionSource::System => &self.system,
        }
    }
}

/// Query one store for the permissions recorded against `bundle_identifier`.
///
/// The connection lives only for the duration of this call and is closed on
/// every return path.
pub fn query_store(
    store_path: &Path,
    bundle_identifier: &str,
    source: PermissionSource,
) -> Result<Vec<PermissionRecord>, QueryError> {
    debug!("Opening {} TCC store at {}", source, store_path.display());

    let conn = Connection::open_with_flags(
        store_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| QueryError::OpenFailed(e.to_string()))?;

    let mut stmt = conn
        .prepare(ACCESS_QUERY)
        .map_err(|e| QueryError::QueryPreparationFailed(e.to_string()))?;

    let mut rows = stmt
        .query(params![CLIENT_TYPE_BUNDLE_ID, bundle_identifier])
        .map_err(|e| QueryError::QueryPreparationFailed(e.to_string()))?;

    let mut records = Vec::new();
    loop {
        match rows.next() {
            Ok(Some(row)) => records.push(decode_row(row, source)),
            Ok(None) => break,
            Err(e) => {
                // Rows decoded so far are kept; the source is not marked as failed
                warn!(
                    "Stopped reading {} TCC store after {} rows: {}",
                    source,
                    records.len(),
                    e
                );
                break;
            }
        }
    }

    debug!(
        "Read {} {} record(s) for {}",
        records.len(),
        source,
        bundle_identifier
    );
    Ok(records)
}

/// Query both standard stores for `bundle_identifier`
pub fn query_all_stores(bundle_identifier: &str) -> PermissionQueryResult {
    query_stores(&StoreLocations::standard(), bundle_identifier)
}

/// Query both stores independently and merge their outcomes.
///
/// Both queries always run to completion; a failure in one is recorded as
/// that source's error and never affects the other.
pub fn query_stores(locations: &StoreLocations, bundle_identifier: &str) -> PermissionQueryResult {
    let (user, system) = rayon::join(
        || query_store(&locations.user, bundle_identifier, PermissionSource::User),
        || query_store(&locations.system, bundle_identifier, PermissionSource::System),
    );

    let mut result = PermissionQueryResult::default();

    match user {
        Ok(records) => result.user_records = records,
        Err(e) => {
            info!("User TCC store unavailable: {}", e);
            result.user_error = Some(e.to_string());
        }
    }

    match system {
        Ok(records) => result.system_records = records,
        Err(e) => {
            info!("System TCC store unavailable: {}", e);
            result.system_error = Some(e.to_string());
        }
    }

    result
}

fn decode_row(row: &Row<'_>, source: PermissionSource) -> PermissionRecord {
    let service = match row.get_ref(0) {
        Ok(ValueRef::Text(bytes)) | Ok(ValueRef::Blob(bytes)) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
        Ok(ValueRef::Integer(i)) => i.to_string(),
        Ok(ValueRef::Real(f)) => f.to_string(),
        _ => String::new(),
    };

    let auth_value = optional_integer(row, 1).unwrap_or(0);
    let auth_reason = optional_integer(row, 2);
    let last_modified = optional_integer(row, 3).and_then(epoch_to_timestamp);

    PermissionRecord::new(service, auth_value, auth_reason, last_modified, source)
}

/// Integer column with SQLite-style coercion; NULL becomes `None`
fn optional_integer(row: &Row<'_>, index: usize) -> Option<i64> {
    match row.get_ref(index).ok()? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) => Some(f as i64),
        ValueRef::Text(bytes) => Some(
            std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(0),
        ),
        ValueRef::Blob(_) => Some(0),
    }
}

fn epoch_to_timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    let timestamp = DateTime::from_timestamp(seconds, 0);
    if timestamp.is_none() {
        debug!("Ignoring out-of-range last_modified value {}", seconds);
    }
    timestamp
}
