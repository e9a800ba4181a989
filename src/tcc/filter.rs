//! Service filtering for query results
//!
//! Filters are matched against the raw service identifier. A filter that
//! contains glob characters ('*', '?', '[') is treated as a glob pattern,
//! anything else must match exactly.

use anyhow::{anyhow, Result};
use glob::Pattern;

use crate::models::PermissionRecord;

/// Check if a filter string contains glob pattern characters
pub fn is_glob_pattern(filter: &str) -> bool {
    filter.contains('*') || filter.contains('?') || filter.contains('[')
}

/// Match a service identifier against a single filter
pub fn matches_service_filter(service: &str, filter: &str) -> bool {
    if is_glob_pattern(filter) {
        match Pattern::new(filter) {
            Ok(pattern) => pattern.matches(service),
            // Invalid patterns are rejected by validate_service_filters;
            // fall back to exact matching if one slips through
            Err(_) => service == filter,
        }
    } else {
        service == filter
    }
}

/// True when no filters are given or any filter matches the record's service
pub fn record_matches_filters(record: &PermissionRecord, filters: &[String]) -> bool {
    filters.is_empty()
        || filters
            .iter()
            .any(|filter| matches_service_filter(&record.service, filter))
}

/// Validate that all filters are syntactically correct glob patterns
pub fn validate_service_filters(filters: &[String]) -> Result<()> {
    for filter in filters {
        if is_glob_pattern(filter) {
            Pattern::new(filter)
                .map_err(|e| anyhow!("Invalid service pattern '{}': {}", filter, e))?;
        }
    }
    Ok(())
}
