use serde_json::Value;

use crate::{client::ApiClient, error::Result};

/// Basic account profile of `user_id`.
pub async fn get_user_profile(client: &ApiClient, user_id: i64) -> Result<Value> {
    client.get(&format!("/user/{user_id}/profile")).await
}

pub async fn update_user_profile(
    client: &ApiClient,
    user_id: i64,
    profile: &Value,
) -> Result<Value> {
    client
        .post(&format!("/user/{user_id}/profile/update"), profile)
        .await
}
