#![allow(dead_code)]

//! Fixture TCC stores for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tempfile::TempDir;

/// `access` table as shipped by recent macOS releases
pub const MACOS_ACCESS_SCHEMA: &str = "CREATE TABLE access (
    service TEXT NOT NULL,
    client TEXT NOT NULL,
    client_type INTEGER NOT NULL,
    auth_value INTEGER NOT NULL,
    auth_reason INTEGER NOT NULL,
    auth_version INTEGER NOT NULL,
    csreq BLOB,
    policy_id INTEGER,
    indirect_object_identifier_type INTEGER,
    indirect_object_identifier TEXT NOT NULL DEFAULT 'UNUSED',
    indirect_object_code_identity BLOB,
    flags INTEGER,
    last_modified INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER)),
    PRIMARY KEY (service, client, client_type, indirect_object_identifier)
)";

/// Relaxed schema allowing NULL reason and timestamp
pub const NULLABLE_ACCESS_SCHEMA: &str = "CREATE TABLE access (
    service TEXT,
    client TEXT NOT NULL,
    client_type INTEGER NOT NULL,
    auth_value INTEGER NOT NULL,
    auth_reason INTEGER,
    last_modified INTEGER
)";

/// Older layout without auth_reason; the engine's query cannot be prepared against it
pub const LEGACY_ACCESS_SCHEMA: &str = "CREATE TABLE access (
    service TEXT NOT NULL,
    client TEXT NOT NULL,
    client_type INTEGER NOT NULL,
    allowed INTEGER NOT NULL,
    prompt_count INTEGER NOT NULL
)";

/// One row of the access table
#[derive(Debug, Clone)]
pub struct StoreRow {
    pub service: String,
    pub client: String,
    pub client_type: i64,
    pub auth_value: i64,
    pub auth_reason: Option<i64>,
    pub last_modified: Option<i64>,
}

impl StoreRow {
    /// Row keyed by bundle identifier with reason "User consent" and a fixed timestamp
    pub fn bundle(service: &str, client: &str, auth_value: i64) -> Self {
        Self {
            service: service.to_string(),
            client: client.to_string(),
            client_type: 0,
            auth_value,
            auth_reason: Some(1),
            last_modified: Some(1_700_000_000),
        }
    }

    /// Row keyed by filesystem path
    pub fn path(service: &str, client: &str, auth_value: i64) -> Self {
        Self {
            client_type: 1,
            ..Self::bundle(service, client, auth_value)
        }
    }

    pub fn without_details(mut self) -> Self {
        self.auth_reason = None;
        self.last_modified = None;
        self
    }
}

/// Create a store at `path` with the relaxed schema and the given rows
pub fn create_store(path: &Path, rows: &[StoreRow]) -> PathBuf {
    create_store_with_schema(path, NULLABLE_ACCESS_SCHEMA, rows)
}

/// Create a store with the macOS schema; rows must carry a reason and timestamp
pub fn create_macos_store(path: &Path, rows: &[StoreRow]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(MACOS_ACCESS_SCHEMA).unwrap();
    for row in rows {
        conn.execute(
            "INSERT INTO access (service, client, client_type, auth_value, auth_reason, auth_version, last_modified)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
            params![
                row.service,
                row.client,
                row.client_type,
                row.auth_value,
                row.auth_reason.unwrap_or(0),
                row.last_modified.unwrap_or(0)
            ],
        )
        .unwrap();
    }
    path.to_path_buf()
}

pub fn create_store_with_schema(path: &Path, schema: &str, rows: &[StoreRow]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(schema).unwrap();
    for row in rows {
        conn.execute(
            "INSERT INTO access (service, client, client_type, auth_value, auth_reason, last_modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.service,
                row.client,
                row.client_type,
                row.auth_value,
                row.auth_reason,
                row.last_modified
            ],
        )
        .unwrap();
    }
    path.to_path_buf()
}

/// Number of rows in the access table
pub fn row_count(path: &Path) -> i64 {
    let conn = Connection::open(path).unwrap();
    conn.query_row("SELECT COUNT(*) FROM access", [], |row| row.get(0))
        .unwrap()
}

/// A temporary home directory whose user TCC store can be populated
pub struct FakeHome {
    pub dir: TempDir,
}

impl FakeHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Location the tool resolves for the user store under this home
    pub fn user_store_path(&self) -> PathBuf {
        self.dir
            .path()
            .join("Library/Application Support/com.apple.TCC/TCC.db")
    }

    pub fn with_user_store(self, rows: &[StoreRow]) -> Self {
        create_macos_store(&self.user_store_path(), rows);
        self
    }
}

/// Standard three-permission fixture for `com.example.App`
pub fn example_rows() -> Vec<StoreRow> {
    vec![
        StoreRow::bundle("kTCCServiceCamera", "com.example.App", 1),
        StoreRow::bundle("kTCCServiceMicrophone", "com.example.App", 0),
        StoreRow::bundle("kTCCServiceAccessibility", "com.example.App", 1),
    ]
}
