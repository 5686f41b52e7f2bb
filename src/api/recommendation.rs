use serde_json::{Value, json};

use crate::{client::ApiClient, error::Result};

/// Checkup items recommended for `user_id`.
pub async fn get_personalized_recommendations(client: &ApiClient, user_id: i64) -> Result<Value> {
    client
        .get(&format!("/recommendation/personalized/{user_id}"))
        .await
}

/// Posts feedback with `user_id` merged into the feedback object. Non-object
/// feedback is sent under a `feedback` key.
///
/// # Arguments
///
/// * `client` - The shared API client
/// * `user_id` - Written first, so a `user_id` in `feedback` wins
/// * `feedback` - Usually `{"item_id": .., "rating": ..}`
///
/// # Example
///
/// ```
/// let feedback = json!({"item_id": 9, "rating": 5});
/// recommendation::save_recommendation_feedback(&client, 4, &feedback).await?;
/// ```
pub async fn save_recommendation_feedback(
    client: &ApiClient,
    user_id: i64,
    feedback: &Value,
) -> Result<Value> {
    let body = match feedback {
        Value::Object(fields) => {
            let mut body = serde_json::Map::new();
            body.insert("user_id".to_string(), json!(user_id));
            body.extend(fields.clone());
            Value::Object(body)
        }
        other => json!({ "user_id": user_id, "feedback": other }),
    };
    client.post("/recommendation/feedback", &body).await
}
