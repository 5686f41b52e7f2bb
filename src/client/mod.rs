//! # HTTP client
//!
//! A single configured client shared by every API module. It is bound to the
//! backend origin plus a base path and runs each call through the same
//! pipeline:
//!
//! ```text
//! ApiRequest
//!     ↓  request interceptors (bearer token, static headers, ...)
//! reqwest send (fixed timeout)
//!     ↓
//! envelope::normalize   → data | Error
//!     ↓ on Error
//! responder::respond    → session cleared / notification emitted
//! ```
//!
//! Callers receive either the `data` of a successful envelope or an
//! [`Error`](crate::Error) from the documented taxonomy.

pub mod envelope;
pub mod interceptor;
pub mod responder;

use std::sync::Arc;

use reqwest::{
    Method, RequestBuilder,
    header::{HeaderMap, HeaderName, HeaderValue},
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    events::EventBus,
    session::Session,
    types::Upload,
};

pub use interceptor::{BearerAuth, RequestInterceptor, StaticHeader};

/// Request payload encodings the backend accepts.
#[derive(Debug, Clone, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
    Multipart(Upload),
}

/// A single call: method, path relative to the client's base path, body and
/// per-request headers.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Body::Empty,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Body::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn multipart(mut self, upload: Upload) -> Self {
        self.body = Body::Multipart(upload);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// The configured request-sending object.
///
/// Cheap to clone; clones share the connection pool, the session and the
/// event bus.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    events: EventBus,
    interceptors: Arc<Vec<Arc<dyn RequestInterceptor>>>,
}

impl ApiClient {
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path relative to the base path. A trailing slash on
    /// `path` is preserved.
    pub fn url(&self, path: &str) -> Result<url::Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(url::Url::parse(&joined)?)
    }

    /// Sends the request and returns the unwrapped `data`.
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        match self.execute(request).await {
            Ok(value) => Ok(value),
            Err(err) => Err(responder::respond(err, &self.session, &self.events).await),
        }
    }

    /// Like [`send`](Self::send) but decodes `data` into `T`. A body of the
    /// wrong shape goes through the same error handling as a failed call.
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        match decode(self.send(request).await?) {
            Ok(value) => Ok(value),
            Err(err) => Err(responder::respond(err, &self.session, &self.events).await),
        }
    }

    /// Sends the request without the error side effects: a 401 here leaves
    /// the session alone and nothing is announced on the event bus.
    pub async fn send_unhandled(&self, request: ApiRequest) -> Result<Value> {
        self.execute(request).await
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    /// POST without a body.
    pub async fn post_empty(&self, path: &str) -> Result<Value> {
        self.send(ApiRequest::post(path)).await
    }

    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(ApiRequest::delete(path)).await
    }

    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url(&request.path)?;
        let session = self.session.snapshot().await;

        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self
            .http
            .request(request.method, url)
            .headers(request.headers);
        for interceptor in self.interceptors.iter() {
            builder = interceptor.intercept(builder, &session);
        }
        let builder = apply_body(builder, request.body)?;

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        tracing::debug!(%status, bytes = bytes.len(), "received response");
        envelope::normalize(status, &bytes)
    }
}

/// Decodes unwrapped `data` into a typed value.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Server {
        status: 200,
        message: format!("unexpected response shape: {e}"),
    })
}

fn apply_body(builder: RequestBuilder, body: Body) -> Result<RequestBuilder> {
    Ok(match body {
        Body::Empty => builder,
        Body::Json(value) => builder.json(&value),
        Body::Form(fields) => builder.form(&fields),
        Body::Multipart(upload) => builder.multipart(multipart_form(upload)?),
    })
}

fn multipart_form(upload: Upload) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in upload.fields {
        form = form.text(name, value);
    }

    let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
    if let Some(mime) = upload.mime {
        part = part
            .mime_str(&mime)
            .map_err(|e| Error::Config(format!("invalid mime type {mime}: {e}")))?;
    }
    Ok(form.part(upload.field, part))
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Network("request timed out".to_string())
    } else {
        Error::Network(err.to_string())
    }
}

/// Factory for [`ApiClient`]. The bearer interceptor is installed unless
/// [`without_auth`](Self::without_auth) is called.
pub struct ClientBuilder {
    config: ClientConfig,
    session: Option<Session>,
    events: Option<EventBus>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    bearer_auth: bool,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: None,
            events: None,
            interceptors: Vec::new(),
            bearer_auth: true,
        }
    }

    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Overrides the base path from the configuration, e.g. `/api`.
    pub fn base_path(mut self, prefix: impl Into<String>) -> Self {
        self.config.api_prefix = prefix.into();
        self
    }

    pub fn interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.bearer_auth = false;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let base_url = format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.api_prefix.trim_matches('/')
        );
        url::Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        let mut interceptors: Vec<Arc<dyn RequestInterceptor>> = Vec::new();
        if self.bearer_auth {
            interceptors.push(Arc::new(BearerAuth));
        }
        interceptors.extend(self.interceptors);

        Ok(ApiClient {
            http,
            base_url,
            session: self.session.unwrap_or_default(),
            events: self.events.unwrap_or_default(),
            interceptors: Arc::new(interceptors),
        })
    }
}
