//! HTTP transport.
//!
//! `Transport` is the seam between the API client and the network: the
//! browser implementation sends through `gloo-net` with a hard timeout, tests
//! swap in a recorder. Requests and responses are plain data so both sides
//! can be inspected without a browser.

use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use kejaksaan_shared::protocol::HttpMethod;
use std::time::Duration;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{AbortController, AbortSignal, FormData, HtmlInputElement};

/// Failure below the HTTP layer: no status code was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

// =========================================================
// Request / Response
// =========================================================

/// A file picked by the user.
///
/// Metadata is copied out at pick time so size and type checks run without
/// touching the browser object.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    handle: Option<web_sys::File>,
}

impl UploadFile {
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            size: file.size() as u64,
            mime: file.type_(),
            handle: Some(file),
        }
    }

    /// First file picked in an `<input type="file">`. The input is cleared so
    /// choosing the same file again fires another change.
    pub fn from_change_event(ev: &web_sys::Event) -> Option<Self> {
        let input = ev.target()?.dyn_into::<HtmlInputElement>().ok()?;
        let file = input.files()?.get(0)?;
        input.set_value("");
        Some(Self::from_file(file))
    }

    /// Metadata without content.
    #[cfg(test)]
    pub fn detached(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
            handle: None,
        }
    }

    pub fn handle(&self) -> Option<&web_sys::File> {
        self.handle.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum FormField {
    Text(String),
    File(UploadFile),
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON.
    Json(String),
    Multipart(Vec<(String, FormField)>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Case-insensitive header lookup.
    #[cfg(test)]
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[cfg(test)]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    /// Any status code is a successful send; only missing responses are errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// Browser transport
// =========================================================

/// `fetch` through `gloo-net`, aborted after `timeout`.
#[derive(Debug, Clone, Copy)]
pub struct GlooTransport {
    timeout: Duration,
}

impl GlooTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn builder(request: &HttpRequest) -> RequestBuilder {
        match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        }
    }

    fn build(request: &HttpRequest, signal: &AbortSignal) -> Result<Request, TransportError> {
        let mut builder = Self::builder(request).abort_signal(Some(signal));
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let built = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder.body(json.clone()),
            // The browser writes the multipart boundary into Content-Type itself.
            RequestBody::Multipart(fields) => builder.body(Self::form_data(fields)?),
        };
        built.map_err(|e| TransportError::Build(e.to_string()))
    }

    fn form_data(fields: &[(String, FormField)]) -> Result<FormData, TransportError> {
        let form = FormData::new().map_err(|e| TransportError::Build(format!("{e:?}")))?;
        for (name, field) in fields {
            let appended = match field {
                FormField::Text(value) => form.append_with_str(name, value),
                FormField::File(file) => {
                    let handle = file.handle().ok_or_else(|| {
                        TransportError::Build(format!("content of {} is unavailable", file.name))
                    })?;
                    form.append_with_blob_and_filename(name, handle, &file.name)
                }
            };
            appended.map_err(|e| TransportError::Build(format!("{e:?}")))?;
        }
        Ok(form)
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let controller =
            AbortController::new().map_err(|e| TransportError::Build(format!("{e:?}")))?;
        let built = Self::build(&request, &controller.signal())?;

        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let sending = Box::pin(built.send());
        let deadline = Box::pin(TimeoutFuture::new(millis));

        match future::select(sending, deadline).await {
            Either::Left((result, _)) => {
                let response = result.map_err(|e| TransportError::Network(e.to_string()))?;
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                Ok(HttpResponse { status, body })
            }
            Either::Right(_) => {
                controller.abort();
                Err(TransportError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::new(HttpMethod::Get, "https://x/cases")
            .header("Authorization", "Bearer t");
        assert_eq!(req.header_value("authorization"), Some("Bearer t"));
        assert_eq!(req.header_value("content-type"), None);
    }

    #[test]
    fn response_ok_is_2xx() {
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(401, "").ok());
        assert!(!HttpResponse::new(302, "").ok());
    }
}
