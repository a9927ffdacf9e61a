#![forbid(unsafe_code)]

//! Ordered query-string serialization for GET params and form bodies.
//!
//! Mirrors the backend's expected shape: `key=value&...` in insertion order,
//! nested maps flattened as `parent[child]=value`, null/empty values skipped,
//! no trailing separator.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

// Everything except the unreserved characters of encodeURIComponent.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_skipped(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn push_pair(out: &mut String, key: &str, value: &Value) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(&encode_component(key));
    out.push('=');
    out.push_str(&encode_component(&scalar(value)));
}

/// Serialize params into a query string, preserving insertion order.
pub fn encode_params(params: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (name, value) in params {
        if is_skipped(value) {
            continue;
        }
        match value {
            Value::Object(inner) => {
                for (key, v) in inner {
                    if is_skipped(v) {
                        continue;
                    }
                    push_pair(&mut out, &format!("{name}[{key}]"), v);
                }
            }
            Value::Array(items) => {
                for (idx, v) in items.iter().enumerate() {
                    if is_skipped(v) {
                        continue;
                    }
                    push_pair(&mut out, &format!("{name}[{idx}]"), v);
                }
            }
            other => push_pair(&mut out, name, other),
        }
    }
    out
}

/// Append params to a URL, leaving it untouched when nothing survives
/// serialization.
pub fn append_params(url: &str, params: &Map<String, Value>) -> String {
    let query = encode_params(params);
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{url}?{query}")
    }
}
