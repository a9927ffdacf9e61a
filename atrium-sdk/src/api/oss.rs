#![forbid(unsafe_code)]

//! OSS object storage: uploads, listings, deletion.
//!
//! Downloads live on the client itself (`Client::download_oss`) since they
//! bypass envelope classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PageQuery;
use crate::client::Client;
use crate::envelope::{Envelope, PageEnvelope};
use crate::error::Result;
use crate::request::{ApiRequest, FilePart};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OssVO {
    pub oss_id: String,
    pub file_name: String,
    pub original_name: String,
    #[serde(default)]
    pub file_suffix: Option<String>,
    pub url: String,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OssQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// Reply of a successful upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OssUploadResult {
    pub url: String,
    pub file_name: String,
    pub oss_id: String,
}

pub async fn list_oss(client: &Client, query: &OssQuery) -> Result<PageEnvelope<OssVO>> {
    client
        .send_page(ApiRequest::get("/resource/oss/list").params_from(query)?)
        .await
}

pub async fn list_oss_by_ids(client: &Client, oss_ids: &[&str]) -> Result<Envelope<Vec<OssVO>>> {
    client
        .send(ApiRequest::get(format!(
            "/resource/oss/listByIds/{}",
            oss_ids.join(",")
        )))
        .await
}

/// Multipart upload of a single file. The duplicate-submission guard
/// fingerprints the field names rather than the raw bytes.
pub async fn upload_oss(
    client: &Client,
    file_name: &str,
    bytes: Vec<u8>,
    mime: Option<&str>,
) -> Result<Envelope<OssUploadResult>> {
    let part = FilePart {
        name: "file".into(),
        file_name: file_name.into(),
        bytes,
        mime: mime.map(str::to_string),
    };
    client
        .send(ApiRequest::post("/resource/oss/upload").multipart(Vec::new(), vec![part]))
        .await
}

pub async fn delete_oss(client: &Client, oss_ids: &[&str]) -> Result<Envelope<Value>> {
    client
        .send_unit(ApiRequest::delete(format!(
            "/resource/oss/{}",
            oss_ids.join(",")
        )))
        .await
}
