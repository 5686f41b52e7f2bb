//! Health data the user enters or uploads.

use serde_json::Value;

use crate::{
    client::{ApiClient, ApiRequest},
    error::Result,
    types::Upload,
};

/// Replaces the stored health information.
///
/// The backend identifies the user from the token; `user_id` is accepted for
/// call-site symmetry with the read side and not sent.
///
/// # Arguments
///
/// * `client` - The shared API client
/// * `_user_id` - Ignored
/// * `health_data` - JSON object with the fields to store
pub async fn update_user_health_info(
    client: &ApiClient,
    _user_id: i64,
    health_data: &Value,
) -> Result<Value> {
    client.post("/health-info/update", health_data).await
}

/// Health information stored for `user_id`.
pub async fn get_user_health_info(client: &ApiClient, user_id: i64) -> Result<Value> {
    client.get(&format!("/health-info/user/{user_id}")).await
}

pub async fn submit_health_info(client: &ApiClient, health_data: &Value) -> Result<Value> {
    client.post("/health-info/submit", health_data).await
}

/// Uploads a medical document, such as a scan or a lab sheet.
///
/// # Arguments
///
/// * `client` - The shared API client
/// * `upload` - The file; sent as `multipart/form-data` under `file`
///
/// # Example
///
/// ```
/// let upload = Upload::from_path("scan.pdf").await?;
/// health_info::upload_medical_report(&client, upload).await?;
/// ```
pub async fn upload_medical_report(client: &ApiClient, upload: Upload) -> Result<Value> {
    client
        .send(ApiRequest::post("/health-info/upload-report").multipart(upload))
        .await
}

/// Asks the backend to derive a user portrait from the stored health data.
pub async fn generate_user_portrait(client: &ApiClient) -> Result<Value> {
    client.get("/health-info/generate-portrait").await
}
