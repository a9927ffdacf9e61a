#![forbid(unsafe_code)]

//! Atrium SDK — typed client for the back-office REST API
//!
//! - Error/Result types (`atrium_sdk::Error` / `atrium_sdk::Result<T>`)
//! - Interceptor pipeline around the HTTP transport (`Client`): auth,
//!   locale and client-id headers, GET query rewriting, duplicate-submission
//!   suppression, optional request encryption, unified error translation
//! - Business envelopes (`Envelope<T>` / `PageEnvelope<T>`)
//! - Download flows that bypass envelope classification
//! - Tree assembly, dictionary and formatting utilities
//! - Typed endpoint wrappers for the system/resource modules (`api`)

pub mod api;
pub mod client;
pub mod codes;
pub mod config;
pub mod context;
pub mod dict;
pub mod download;
pub mod envelope;
pub mod error;
pub mod format;
pub mod guard;
pub mod query;
pub mod request;
pub mod tree;

pub use client::Client;
pub use config::ClientConfig;
pub use context::{CredentialStore, LocaleProvider, MemoryCredentials, Notifier};
pub use download::DownloadPayload;
pub use envelope::{Envelope, PageEnvelope};
pub use error::{Error, Result};
pub use guard::RepeatGuard;
pub use request::{ApiRequest, Body, FilePart, Method};
pub use tree::{handle_tree, TreeOptions};
