//! Global constants for tccinspect
//!
//! Centralized location for application-wide constants

/// Application subsystem identifier for macOS Unified Logging System
pub const APP_SUBSYSTEM: &str = "com.microsoft.sysinternals.tccinspect";

/// Store location relative to a Library root (user home or `/`)
pub const TCC_STORE_RELATIVE_PATH: &str = "Library/Application Support/com.apple.TCC/TCC.db";

/// System-wide store, readable only with Full Disk Access
pub const SYSTEM_TCC_STORE_PATH: &str = "/Library/Application Support/com.apple.TCC/TCC.db";

/// `client_type` marking rows keyed by bundle identifier (1 is a filesystem path)
pub const CLIENT_TYPE_BUNDLE_ID: i64 = 0;

/// Service identifier for Full Disk Access
pub const FULL_DISK_ACCESS_SERVICE: &str = "kTCCServiceSystemPolicyAllFiles";

/// Default date format for human-readable output (medium date, short time)
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";
