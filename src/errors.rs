// Device errors and user-friendly error messages
//
// Every failure is per-call: the client stays usable afterwards, and nothing
// is retried. The helpers below turn a DeviceError into an actionable message
// for the command line.

use std::fmt;

/// Failure of a single device request
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Transport failure: unreachable host, DNS, connection reset, unreadable body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The device answered with a non-success status
    #[error("Device returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

impl DeviceError {
    /// HTTP status code, if the device answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            DeviceError::Http { status, .. } => Some(*status),
            DeviceError::Network(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Whether the device could not be reached
    pub fn is_connect(&self) -> bool {
        match self {
            DeviceError::Network(e) => e.is_connect() || e.is_timeout(),
            DeviceError::Http { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;

/// Format an unreachable-device error with helpful suggestions
pub fn device_unreachable_error(base_url: &str) -> String {
    format!(
        "Could not reach device at {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Device is powered off or not on this network\n\
        • mDNS name does not resolve on this machine\n\
        • Wrong host configured\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Pass the device address explicitly:\n\
           \x1b[36mwebmo --host 192.168.0.10 status\x1b[0m\n\n\
        2. Set a default host:\n\
           \x1b[36mexport WEBMO_HOST=192.168.0.10\x1b[0m\n\n\
        3. Check your config file:\n\
           \x1b[36mcat ~/.webmo/config.toml\x1b[0m",
        base_url
    )
}

/// Format a non-success device response
pub fn http_status_error(status: u16, body: &str) -> String {
    let body = if body.trim().is_empty() { "(empty)" } else { body.trim() };
    let hint = match status {
        404 => "The device firmware does not expose this endpoint. Check the firmware version.",
        400 | 422 => "The device rejected the parameters. Check angle, range and speed values.",
        500..=599 => "The device failed internally. Try `webmo stop-hard` and retry.",
        _ => "Inspect the response body for details.",
    };
    wrap_error_with_suggestion(format!("Device returned HTTP {}\n\nBody: {}", status, body), hint)
}

/// Pick the right message for a device error
pub fn describe(error: &DeviceError, base_url: &str) -> String {
    match error {
        DeviceError::Http { status, body } => http_status_error(*status, body),
        e if e.is_connect() => device_unreachable_error(base_url),
        e => wrap_error_with_suggestion(e, "Run with -v to see request details."),
    }
}

/// Wrap a generic error with suggestions
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!("{}\n\n\x1b[1;33mSuggestion:\x1b[0m {}", error, suggestion)
}
