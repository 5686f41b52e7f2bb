//! # Domain API modules
//!
//! Named functions grouped by backend resource. Each one builds a path,
//! attaches its payload and hands the call to the shared
//! [`ApiClient`](crate::client::ApiClient). Failures are propagated exactly
//! as the client reports them; there is no retry or local recovery here.
//!
//! Paths are relative to the client's base path (`/api/v1` by default):
//!
//! - [`auth`] - `/auth/*`: login, registration, token refresh, passwords
//! - [`health_info`] - `/health-info/*`: health data and medical report upload
//! - [`recommendation`] - `/recommendation/*`: personalised checkup items
//! - [`report`] - `/report/*` and `/user/{id}/reports`
//! - [`user`] - `/user/{id}/profile`
//! - [`user_profile`] - `/user-profile/*`: conversational profile collection
//! - [`user_portrait`] - `/user-portrait/*`: the portrait questionnaire

pub mod auth;
pub mod health_info;
pub mod recommendation;
pub mod report;
pub mod user;
pub mod user_portrait;
pub mod user_profile;

use url::form_urlencoded;

/// Percent-encodes a single path segment.
pub(crate) fn segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
