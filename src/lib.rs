//! tccinspect - macOS privacy permission inspection library
//!
//! This library exposes the TCC data models and the dual-store query
//! engine used to list the privacy permissions recorded for an application.

pub mod bundle;
pub mod config;
pub mod constants;
pub mod models;
pub mod tcc;

pub use models::{PermissionQueryResult, PermissionRecord, PermissionSource};
pub use tcc::{query_all_stores, query_store, QueryError};
