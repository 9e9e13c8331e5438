use api::schemas::ANALYZE_PATH;
use serde_json::Value;
use thiserror::Error;

use super::{AnalyzeRequest, StoredResult};

/// Shown when the server rejects a request without saying why.
pub const GENERIC_FAILURE: &str = "Analysis failed";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzeError {
    #[error("No video file selected")]
    MissingFile,
    /// The server answered with an `error` message.
    #[error("{0}")]
    Rejected(String),
    #[error("{}", GENERIC_FAILURE)]
    Failed,
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one multipart form to the analysis service.
#[allow(async_fn_in_trait)]
pub trait AnalysisTransport {
    async fn post_form(
        &self,
        path: &str,
        request: &AnalyzeRequest,
    ) -> Result<TransportResponse, AnalyzeError>;
}

/// Posts the form once and decodes the reply. There is no retry.
pub async fn submit_analysis<T: AnalysisTransport>(
    transport: &T,
    request: &AnalyzeRequest,
) -> Result<StoredResult, AnalyzeError> {
    tracing::info!(
        file = %request.file.name,
        bytes = request.file.bytes.len(),
        view = %request.view,
        "submitting analysis"
    );
    let response = transport.post_form(ANALYZE_PATH, request).await?;
    interpret_response(response)
}

pub fn interpret_response(response: TransportResponse) -> Result<StoredResult, AnalyzeError> {
    let raw: Value = serde_json::from_str(&response.body)
        .map_err(|err| AnalyzeError::Decode(err.to_string()))?;

    let error = raw.get("error").and_then(message_of);
    if response.ok() && error.is_none() {
        return StoredResult::from_raw(raw).map_err(|err| AnalyzeError::Decode(err.to_string()));
    }

    Err(match error {
        Some(message) => AnalyzeError::Rejected(message),
        None => AnalyzeError::Failed,
    })
}

/// Text of an `error` value, or `None` when it is empty or falsy.
fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(target_arch = "wasm32")]
pub type DefaultTransport = FetchTransport;
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultTransport = HttpTransport;

pub fn default_transport() -> DefaultTransport {
    DefaultTransport::default()
}

/// Browser `fetch` with a `FormData` body, relative to the page origin.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
    pub base: String,
}

#[cfg(target_arch = "wasm32")]
impl AnalysisTransport for FetchTransport {
    async fn post_form(
        &self,
        path: &str,
        request: &AnalyzeRequest,
    ) -> Result<TransportResponse, AnalyzeError> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Blob, BlobPropertyBag, FormData, RequestInit, Response};

        use super::FormValue;

        fn js_err(err: JsValue) -> AnalyzeError {
            AnalyzeError::Transport(
                err.as_string()
                    .unwrap_or_else(|| format!("{err:?}")),
            )
        }

        let window = web_sys::window()
            .ok_or_else(|| AnalyzeError::Transport("window unavailable".into()))?;
        let form = FormData::new().map_err(js_err)?;

        for (name, value) in request.fields() {
            match value {
                FormValue::File(upload) => {
                    let array = js_sys::Uint8Array::from(upload.bytes.as_slice());
                    let parts = js_sys::Array::new();
                    parts.push(&array.buffer());
                    let opts = BlobPropertyBag::new();
                    opts.set_type(upload.mime);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
                        .map_err(js_err)?;
                    form.append_with_blob_and_filename(name, &blob, &upload.name)
                        .map_err(js_err)?;
                }
                FormValue::Text(text) => form.append_with_str(name, text).map_err(js_err)?,
            }
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form.into());

        let url = format!("{}{path}", self.base);
        let response: Response = JsFuture::from(window.fetch_with_str_and_init(&url, &init))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        let body = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?
            .as_string()
            .unwrap_or_default();

        Ok(TransportResponse {
            status: response.status(),
            body,
        })
    }
}

/// `reqwest` client for native builds. The base URL comes from
/// `JAVELINK_API_BASE`, defaulting to a local server.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub base: String,
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[cfg(not(target_arch = "wasm32"))]
impl HttpTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(api_base())
    }
}

/// Server origin for native builds: `JAVELINK_API_BASE` or [`DEFAULT_API_BASE`].
#[cfg(not(target_arch = "wasm32"))]
pub fn api_base() -> String {
    std::env::var("JAVELINK_API_BASE")
        .ok()
        .map(|base| base.trim().trim_end_matches('/').to_string())
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
impl AnalysisTransport for HttpTransport {
    async fn post_form(
        &self,
        path: &str,
        request: &AnalyzeRequest,
    ) -> Result<TransportResponse, AnalyzeError> {
        use reqwest::multipart::{Form, Part};

        use super::FormValue;

        let transport_err = |err: reqwest::Error| AnalyzeError::Transport(err.to_string());

        let mut form = Form::new();
        for (name, value) in request.fields() {
            form = match value {
                FormValue::File(upload) => {
                    let part = Part::bytes(upload.bytes.clone())
                        .file_name(upload.name.clone())
                        .mime_str(upload.mime)
                        .map_err(transport_err)?;
                    form.part(name, part)
                }
                FormValue::Text(text) => form.text(name, text),
            };
        }

        let response = self
            .client
            .post(format!("{}{path}", self.base))
            .multipart(form)
            .send()
            .await
            .map_err(transport_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_err)?;
        Ok(TransportResponse { status, body })
    }
}
