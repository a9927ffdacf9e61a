#![forbid(unsafe_code)]

//! Typed endpoint wrappers for the back-office modules.
//!
//! Each operation is a thin declarative mapping from a DTO to an endpoint,
//! routed through the client pipeline; nothing here adds behavior.

pub mod oss;
pub mod system;

use serde::Serialize;

/// Paging fields shared by all listing queries.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Creation-time range filter, nested under `params` in listing queries.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}
