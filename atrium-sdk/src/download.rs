#![forbid(unsafe_code)]

//! Binary download flows.
//!
//! Download replies bypass envelope classification, with one wrinkle: a
//! reply that claims `application/json` is not file content but an error
//! envelope, and is translated through the code table instead.

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use crate::client::{Client, HEADER_DOWNLOAD_FILENAME};
use crate::codes::{self, MSG_DOWNLOAD_FAILED};
use crate::error::{Error, Result};
use crate::request::{ApiRequest, Method};

/// A successfully downloaded file.
#[derive(Debug, Clone)]
pub struct DownloadPayload {
    /// Decoded `download-filename` header, when the server supplied one.
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Client {
    /// Generic download by URL and params. GET sends the params as a query
    /// string; POST sends them form-encoded, matching the export endpoints.
    pub async fn download(
        &self,
        path: &str,
        params: Map<String, Value>,
        method: Method,
    ) -> Result<DownloadPayload> {
        let req = match method {
            Method::Get => {
                let mut req = ApiRequest::get(path);
                req.params = params;
                req
            }
            Method::Post => ApiRequest::post(path).form(params),
            _ => return Err(Error::protocol("download supports GET and POST only")),
        };
        self.fetch_binary(req).await
    }

    /// Download an OSS object by id.
    pub async fn download_oss(&self, oss_id: &str) -> Result<DownloadPayload> {
        self.fetch_binary(ApiRequest::get(format!("/resource/oss/download/{oss_id}")))
            .await
    }

    async fn fetch_binary(&self, req: ApiRequest) -> Result<DownloadPayload> {
        let resp = self.dispatch(req).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.transport_failure(status.as_u16(), resp).await);
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let file_name = resp
            .headers()
            .get(HEADER_DOWNLOAD_FILENAME)
            .and_then(|v| v.to_str().ok())
            .map(|v| percent_decode_str(v).decode_utf8_lossy().into_owned());

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::transport(None, format!("failed to read download body: {e}")))?;

        // JSON content on a download path is an error envelope, not a file.
        if content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
        {
            return Err(self.translate_download_error(&bytes));
        }

        Ok(DownloadPayload { file_name, content_type, bytes })
    }

    fn translate_download_error(&self, bytes: &[u8]) -> Error {
        let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
            self.notifier().error(MSG_DOWNLOAD_FAILED);
            return Error::protocol(MSG_DOWNLOAD_FAILED);
        };
        let code = value.get("code").and_then(Value::as_i64).unwrap_or(0);
        let msg = u16::try_from(code)
            .ok()
            .and_then(codes::status_message)
            .map(str::to_string)
            .or_else(|| {
                value
                    .get("msg")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| codes::MSG_DEFAULT.to_string());
        self.notifier().error(&msg);
        Error::business(code, msg)
    }
}
