//! Static lookup tables for TCC display strings
//!
//! Every lookup is total: inputs missing from a table fall back to a
//! formatted raw value instead of failing.

use serde::Serialize;

/// Display color class for statuses and source badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Red,
    Green,
    Orange,
    Blue,
    Purple,
    /// Neutral class for unrecognized values
    Gray,
}

/// Known TCC service identifiers and their short labels
pub const SERVICE_NAMES: &[(&str, &str)] = &[
    // System policy folders and volumes
    ("kTCCServiceSystemPolicyAllFiles", "Full Disk Access"),
    ("kTCCServiceSystemPolicyAppBundles", "App Management"),
    ("kTCCServiceSystemPolicyAppData", "App Data"),
    ("kTCCServiceSystemPolicyDesktopFolder", "Desktop Folder"),
    ("kTCCServiceSystemPolicyDocumentsFolder", "Documents Folder"),
    ("kTCCServiceSystemPolicyDownloadsFolder", "Downloads Folder"),
    ("kTCCServiceSystemPolicyNetworkVolumes", "Network Volumes"),
    ("kTCCServiceSystemPolicyRemovableVolumes", "Removable Volumes"),
    // Security and input monitoring
    ("kTCCServiceAccessibility", "Accessibility"),
    ("kTCCServicePostEvent", "Input Monitoring"),
    ("kTCCServiceListenEvent", "Input Monitoring"),
    ("kTCCServiceEndpointSecurityClient", "Endpoint Security"),
    ("kTCCServiceScreenCapture", "Screen Recording"),
    // Hardware and sensors
    ("kTCCServiceCamera", "Camera"),
    ("kTCCServiceMicrophone", "Microphone"),
    ("kTCCServiceLocation", "Location Services"),
    // Personal data
    ("kTCCServiceAddressBook", "Contacts"),
    ("kTCCServiceCalendar", "Calendar"),
    ("kTCCServiceReminders", "Reminders"),
    ("kTCCServicePhotos", "Photos"),
    ("kTCCServiceMediaLibrary", "Apple Music"),
    // Communication
    ("kTCCServiceBluetoothAlways", "Bluetooth"),
    ("kTCCServiceWillow", "Home"),
    // Automation and other
    ("kTCCServiceAppleEvents", "Automation"),
    ("kTCCServiceFileProviderPresence", "File Provider Presence"),
];

/// `auth_reason` codes and how the authorization was established
pub const REASON_TEXTS: &[(i64, &str)] = &[
    (1, "User consent"),
    (2, "User denied"),
    (3, "Service policy"),
    (4, "MDM policy"),
    (5, "Override"),
    (6, "Missing usage string"),
    (7, "Prompt timeout"),
    (8, "Preflight unknown"),
    (9, "Entitled"),
    (10, "App type policy"),
];

/// `auth_value` codes with their label and color
pub const AUTH_STATUSES: &[(i64, &str, DisplayColor)] = &[
    (0, "Denied", DisplayColor::Red),
    (1, "Allowed", DisplayColor::Green),
    (2, "Allowed (Limited)", DisplayColor::Orange),
    (3, "Allowed (One Time)", DisplayColor::Blue),
    (4, "Denied (System)", DisplayColor::Red),
    (5, "Allowed (System)", DisplayColor::Green),
];

/// Auth values that grant access, including limited and one-time grants
pub const GRANTED_AUTH_VALUES: &[i64] = &[1, 2, 3, 5];

/// Human-readable label for a service identifier; unknown identifiers pass through
pub fn friendly_service_name(service: &str) -> String {
    SERVICE_NAMES
        .iter()
        .find(|(key, _)| *key == service)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| service.to_string())
}

/// Explanation of an `auth_reason` code
pub fn friendly_reason_text(reason: i64) -> String {
    REASON_TEXTS
        .iter()
        .find(|(code, _)| *code == reason)
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| format!("Reason {}", reason))
}

pub fn status_text(auth_value: i64) -> String {
    AUTH_STATUSES
        .iter()
        .find(|(code, _, _)| *code == auth_value)
        .map(|(_, label, _)| label.to_string())
        .unwrap_or_else(|| format!("Unknown({})", auth_value))
}

pub fn status_color(auth_value: i64) -> DisplayColor {
    AUTH_STATUSES
        .iter()
        .find(|(code, _, _)| *code == auth_value)
        .map(|(_, _, color)| *color)
        .unwrap_or(DisplayColor::Gray)
}
