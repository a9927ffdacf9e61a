#![forbid(unsafe_code)]

//! Collaborator seams the pipeline is parameterized over.
//!
//! The original application wires these to its credential cookie cache, UI
//! locale store and toast surface; tests substitute in-memory fakes. All are
//! shared `Arc<dyn ...>` objects on the client, never process-wide globals.

use parking_lot::RwLock;

/// Source of the bearer token, and the forced-logout sink.
///
/// `invalidate` is the session-expiry side effect: clear stored credentials
/// so the application shell can route the user back to sign-in. It is called
/// at most once per expired response.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn invalidate(&self);
}

/// Active UI locale, sent as `Content-Language` on every request.
pub trait LocaleProvider: Send + Sync {
    fn language(&self) -> String;
}

/// Fire-and-forget user notification surface (toast/banner).
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
}

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn invalidate(&self) {
        *self.token.write() = None;
    }
}

/// Constant locale.
pub struct FixedLocale(pub String);

impl LocaleProvider for FixedLocale {
    fn language(&self) -> String {
        self.0.clone()
    }
}

/// Notifier that forwards to the tracing subscriber. Useful default for
/// headless callers without a UI surface.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "atrium_sdk::notify", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "atrium_sdk::notify", "{message}");
    }
}
