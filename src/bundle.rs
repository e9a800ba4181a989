//! Target resolution
//!
//! A command-line target is either a bundle identifier or a path to an
//! application bundle. Bundles are resolved through their Info.plist.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors while reading an application bundle
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("No Info.plist found at {0}")]
    MissingInfoPlist(PathBuf),
    #[error("Failed to parse {path}: {message}")]
    InvalidInfoPlist { path: PathBuf, message: String },
    #[error("{0} has no CFBundleIdentifier")]
    MissingIdentifier(PathBuf),
    #[error("Bundle identifier must not be empty")]
    EmptyIdentifier,
}

/// An application to query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppTarget {
    pub bundle_identifier: String,
    /// Name from the bundle's Info.plist, when resolved from a path
    pub app_name: Option<String>,
    pub app_path: Option<PathBuf>,
}

/// Resolve a target argument into a bundle identifier.
///
/// Existing directories are read as app bundles; anything else is taken
/// verbatim as a bundle identifier.
pub fn resolve_target(target: &str) -> Result<AppTarget, BundleError> {
    let path = Path::new(target);
    if path.is_dir() {
        return read_app_bundle(path);
    }

    let bundle_identifier = target.trim();
    if bundle_identifier.is_empty() {
        return Err(BundleError::EmptyIdentifier);
    }

    Ok(AppTarget {
        bundle_identifier: bundle_identifier.to_string(),
        app_name: None,
        app_path: None,
    })
}

/// Read identifier and name from `<bundle>/Contents/Info.plist`
pub fn read_app_bundle(bundle_path: &Path) -> Result<AppTarget, BundleError> {
    let info_plist = bundle_path.join("Contents").join("Info.plist");
    if !info_plist.is_file() {
        return Err(BundleError::MissingInfoPlist(info_plist));
    }

    let value = plist::Value::from_file(&info_plist).map_err(|e| BundleError::InvalidInfoPlist {
        path: info_plist.clone(),
        message: e.to_string(),
    })?;

    let dict = value
        .as_dictionary()
        .ok_or_else(|| BundleError::InvalidInfoPlist {
            path: info_plist.clone(),
            message: "root is not a dictionary".to_string(),
        })?;

    let bundle_identifier = dict
        .get("CFBundleIdentifier")
        .and_then(|v| v.as_string())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BundleError::MissingIdentifier(info_plist.clone()))?;

    let app_name = ["CFBundleDisplayName", "CFBundleName"]
        .iter()
        .filter_map(|key| dict.get(key).and_then(|v| v.as_string()))
        .map(str::to_string)
        .find(|name| !name.is_empty())
        .or_else(|| {
            bundle_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
        });

    Ok(AppTarget {
        bundle_identifier,
        app_name,
        app_path: Some(bundle_path.to_path_buf()),
    })
}
