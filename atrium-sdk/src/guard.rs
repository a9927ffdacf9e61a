#![forbid(unsafe_code)]

//! Duplicate-submission guard.
//!
//! Suppresses accidental double-submits of an identical mutating request
//! within a short window. Exactly one fingerprint (url, serialized body,
//! instant) is stored; the window slides from the last *accepted* request,
//! so a rejected attempt does not extend the suppression.

use crate::codes::MSG_REPEAT_SUBMIT;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Interval within which an identical mutating request is rejected.
pub const REPEAT_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Fingerprint {
    url: String,
    body: String,
    at: Instant,
}

/// Session-scoped duplicate-submission state. The mutex makes the
/// read-compare-store step atomic under real threads; the original runtime
/// was single-threaded and needed no lock.
pub struct RepeatGuard {
    last: Mutex<Option<Fingerprint>>,
    window: Duration,
}

impl Default for RepeatGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RepeatGuard {
    pub fn new() -> Self {
        Self::with_window(REPEAT_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self { last: Mutex::new(None), window }
    }

    /// Accept or reject a mutating request, updating the fingerprint on
    /// acceptance. Only POST/PUT reach this; the pipeline handles that.
    pub fn check(&self, url: &str, body: &str) -> Result<()> {
        self.check_at(url, body, Instant::now())
    }

    pub(crate) fn check_at(&self, url: &str, body: &str, now: Instant) -> Result<()> {
        let mut last = self.last.lock();
        if let Some(fp) = last.as_ref() {
            if fp.url == url
                && fp.body == body
                && now.saturating_duration_since(fp.at) < self.window
            {
                tracing::warn!(%url, "duplicate submission suppressed");
                return Err(Error::DuplicateSubmission(MSG_REPEAT_SUBMIT.into()));
            }
        }
        *last = Some(Fingerprint { url: url.to_string(), body: body.to_string(), at: now });
        Ok(())
    }

    /// Forget the stored fingerprint.
    pub fn reset(&self) {
        *self.last.lock() = None;
    }
}
