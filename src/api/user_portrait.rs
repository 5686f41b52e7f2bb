//! The step-by-step portrait questionnaire.

use serde_json::Value;

use crate::{
    client::ApiClient,
    error::Result,
    types::{DynamicAnswer, PortraitStep},
};

/// Current step and completion of the questionnaire.
pub async fn get_progress(client: &ApiClient) -> Result<Value> {
    client.get("/user-portrait/progress").await
}

/// Submits the answers for one questionnaire step.
///
/// # Arguments
///
/// * `client` - The shared API client
/// * `step` - Step identifier, e.g. `basic_info`
/// * `data` - The answers for that step
///
/// # Returns
///
/// The backend's view of the flow after the step, usually naming the next
/// one.
pub async fn submit_step(client: &ApiClient, step: &str, data: Value) -> Result<Value> {
    let body = PortraitStep {
        step: step.to_string(),
        data,
    };
    client.post("/user-portrait/step", &body).await
}

/// Answers a generated follow-up question.
pub async fn submit_dynamic_answer(client: &ApiClient, answer: &str) -> Result<Value> {
    let body = DynamicAnswer {
        answer: answer.to_string(),
    };
    client.post("/user-portrait/dynamic-question", &body).await
}

pub async fn skip_step(client: &ApiClient) -> Result<Value> {
    client.post_empty("/user-portrait/skip").await
}

/// Starts the questionnaire over. Stored answers are discarded.
pub async fn reset_questionnaire(client: &ApiClient) -> Result<Value> {
    client.post_empty("/user-portrait/reset").await
}

pub async fn get_all_steps(client: &ApiClient) -> Result<Value> {
    client.get("/user-portrait/steps").await
}

pub async fn get_flow_status(client: &ApiClient) -> Result<Value> {
    client.get("/user-portrait/status").await
}

/// Fetches the stored portrait.
///
/// This endpoint nests a second envelope inside `data`. When the inner
/// `status` is `"success"` its `data` is returned; anything else comes back
/// as received.
pub async fn get_user_portrait(client: &ApiClient) -> Result<Value> {
    let data = client.get("/user-profile/").await?;
    match data.get("status").and_then(Value::as_str) {
        Some("success") => Ok(data.get("data").cloned().unwrap_or(Value::Null)),
        _ => Ok(data),
    }
}

pub async fn get_user_symptoms(client: &ApiClient) -> Result<Value> {
    client.get("/user-portrait/symptoms").await
}

pub async fn update_user_portrait(client: &ApiClient, data: &Value) -> Result<Value> {
    client.put("/user-profile/", data).await
}
