//! Conversational profile collection and the symptom follow-up knowledge
//! base.

use serde_json::Value;

use crate::{api::segment, client::ApiClient, error::Result};

/// Opens a profile conversation and returns the first prompt.
pub async fn initialize_profile(client: &ApiClient) -> Result<Value> {
    client.post_empty("/user-profile/initialize").await
}

/// Sends one user message to the profile conversation.
///
/// # Arguments
///
/// * `client` - The shared API client
/// * `input` - The message payload, e.g. `{"message": "I sleep badly"}`
///
/// # Returns
///
/// The assistant's reply together with whatever profile fields it
/// extracted.
pub async fn process_input(client: &ApiClient, input: &Value) -> Result<Value> {
    client.post("/user-profile/process", input).await
}

pub async fn save_profile(client: &ApiClient, profile: &Value) -> Result<Value> {
    client.post("/user-profile", profile).await
}

pub async fn get_profile(client: &ApiClient) -> Result<Value> {
    client.get("/user-profile").await
}

pub async fn update_profile(client: &ApiClient, user_id: i64, profile: &Value) -> Result<Value> {
    client
        .put(&format!("/user-profile/{user_id}"), profile)
        .await
}

/// Follow-up questions the knowledge base holds for `symptom`.
///
/// The symptom is percent-encoded into a single path segment, so free text
/// with spaces or slashes is safe.
///
/// # Example
///
/// ```
/// let questions = user_profile::get_symptom_follow_up_questions(&client, "chest pain").await?;
/// ```
pub async fn get_symptom_follow_up_questions(client: &ApiClient, symptom: &str) -> Result<Value> {
    client
        .get(&format!(
            "/user-profile/symptom-questions/{}",
            segment(symptom)
        ))
        .await
}

pub async fn get_conversation_history(client: &ApiClient) -> Result<Value> {
    client.get("/user-profile/conversation-history").await
}

/// Deletes the stored conversation. The collected profile stays.
pub async fn clear_conversation_history(client: &ApiClient) -> Result<Value> {
    client.delete("/user-profile/conversation-history").await
}
