//! Medical checkup reports.

use serde_json::Value;

use crate::{
    client::{ApiClient, ApiRequest},
    error::Result,
    types::Upload,
};

/// All reports of `user_id`, newest first as the backend orders them.
pub async fn get_user_reports(client: &ApiClient, user_id: i64) -> Result<Value> {
    client.get(&format!("/user/{user_id}/reports")).await
}

pub async fn get_report_detail(client: &ApiClient, report_id: i64) -> Result<Value> {
    client.get(&format!("/report/{report_id}")).await
}

/// Uploads a report file for `user_id` as multipart form data.
///
/// # Arguments
///
/// * `client` - The shared API client
/// * `user_id` - Sent as a `user_id` text field next to the file
/// * `upload` - The report file
///
/// # Returns
///
/// The backend's description of the stored report, typically carrying its
/// `report_id`.
pub async fn upload_report(client: &ApiClient, user_id: i64, upload: Upload) -> Result<Value> {
    let upload = upload.with_field("user_id", user_id.to_string());
    client
        .send(ApiRequest::post("/report/upload").multipart(upload))
        .await
}
