#![forbid(unsafe_code)]

//! Static translation of transport/business failure codes to user-facing
//! messages, with a default fallback.

pub const MSG_UNAUTHORIZED: &str = "Authentication failed, unable to access system resources";
pub const MSG_FORBIDDEN: &str = "The current operation is not authorized";
pub const MSG_NOT_FOUND: &str = "The requested resource does not exist";
pub const MSG_DEFAULT: &str = "Unknown system error, please contact the administrator";

pub const MSG_NETWORK: &str = "Unable to reach the backend service";
pub const MSG_TIMEOUT: &str = "Backend request timed out";

pub const MSG_SESSION_EXPIRED: &str =
    "Invalid session, or the session has expired. Please sign in again.";
pub const MSG_NOT_THIS_SYSTEM: &str = "Response did not come from this system";
pub const MSG_REPEAT_SUBMIT: &str = "Request is being processed, please do not resubmit";
pub const MSG_DOWNLOAD_FAILED: &str = "File download failed, malformed response";

/// Message for a known HTTP status, if any.
pub fn status_message(status: u16) -> Option<&'static str> {
    match status {
        401 => Some(MSG_UNAUTHORIZED),
        403 => Some(MSG_FORBIDDEN),
        404 => Some(MSG_NOT_FOUND),
        _ => None,
    }
}

/// Message for an HTTP status, falling back to the default.
pub fn translate(status: u16) -> &'static str {
    status_message(status).unwrap_or(MSG_DEFAULT)
}
