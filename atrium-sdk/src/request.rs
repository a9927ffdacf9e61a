#![forbid(unsafe_code)]

//! Typed request descriptors.
//!
//! The dynamic per-call config object of the original layer becomes an
//! explicit struct: control flags are real booleans instead of ad-hoc header
//! keys, and the body is an enum rather than an opaque payload.

use crate::error::Result;
use crate::query;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// POST and PUT are guarded against duplicate submission and eligible
    /// for body encryption; GET and DELETE bypass both.
    pub fn is_mutating(self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One file of a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Body {
    /// JSON payload, sent as `application/json;charset=utf-8`.
    Json(Value),
    /// Ordered form fields, sent as `application/x-www-form-urlencoded`.
    Form(Map<String, Value>),
    /// Multipart upload. No explicit content type is set so the transport
    /// can supply the boundary.
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<FilePart>,
    },
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/system/config/list`.
    pub path: String,
    /// GET query params, serialized into the URL in insertion order.
    pub params: Map<String, Value>,
    pub body: Option<Body>,
    /// Attach the bearer token (default true).
    pub with_token: bool,
    /// Run the duplicate-submission guard on mutating methods (default true).
    pub repeat_submit: bool,
    /// Opt this call into request encryption (also needs the global flag).
    pub encrypt: bool,
    /// Extra headers for this call only.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Map::new(),
            body: None,
            with_token: true,
            repeat_submit: true,
            encrypt: false,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Serialize a query struct into params. Struct field order is kept.
    pub fn params_from<T: Serialize>(mut self, query: &T) -> Result<Self> {
        if let Value::Object(map) = serde_json::to_value(query)? {
            self.params.extend(map);
        }
        Ok(self)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(Body::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    pub fn json_value(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    pub fn form(mut self, fields: Map<String, Value>) -> Self {
        self.body = Some(Body::Form(fields));
        self
    }

    pub fn multipart(mut self, fields: Vec<(String, String)>, files: Vec<FilePart>) -> Self {
        self.body = Some(Body::Multipart { fields, files });
        self
    }

    /// Skip the Authorization header for this call.
    pub fn no_auth(mut self) -> Self {
        self.with_token = false;
        self
    }

    /// Opt out of the duplicate-submission guard.
    pub fn allow_repeat(mut self) -> Self {
        self.repeat_submit = false;
        self
    }

    pub fn encrypted(mut self) -> Self {
        self.encrypt = true;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serialized body used by the duplicate-submission guard. Multipart
    /// bodies fingerprint over their text fields and file names rather than
    /// the raw file bytes.
    pub(crate) fn fingerprint(&self) -> String {
        match &self.body {
            None => String::new(),
            Some(Body::Json(value)) => value.to_string(),
            Some(Body::Form(fields)) => query::encode_params(fields),
            Some(Body::Multipart { fields, files }) => {
                let mut parts: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect();
                parts.extend(files.iter().map(|f| format!("{}@{}", f.name, f.file_name)));
                parts.join("&")
            }
        }
    }
}
