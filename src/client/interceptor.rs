use reqwest::RequestBuilder;

use crate::session::SessionData;

/// Middleware applied to every outgoing request before it is sent.
///
/// Interceptors run in the order they were registered on the
/// [`ClientBuilder`](super::ClientBuilder) and see the session as it was when
/// the request was built.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: RequestBuilder, session: &SessionData) -> RequestBuilder;
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerAuth;

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: RequestBuilder, session: &SessionData) -> RequestBuilder {
        match &session.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Adds a fixed header to every request.
#[derive(Debug, Clone)]
pub struct StaticHeader {
    name: String,
    value: String,
}

impl StaticHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl RequestInterceptor for StaticHeader {
    fn intercept(&self, request: RequestBuilder, _session: &SessionData) -> RequestBuilder {
        request.header(self.name.as_str(), self.value.as_str())
    }
}
