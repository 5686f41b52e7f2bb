use std::path::PathBuf;

use crate::{
    api::recommendation,
    cli::{Context, payload, show, spinner},
    warning,
};

const VIEW: &str = "/recommendations";

pub async fn recommend(ctx: &Context, user_id: Option<i64>) {
    if !ctx.enter(VIEW).await {
        return;
    }
    let Some(user_id) = ctx.user_id(user_id).await else {
        return;
    };

    let pb = spinner("Fetching personalised recommendations...");
    let result = recommendation::get_personalized_recommendations(&ctx.client, user_id).await;
    pb.finish_and_clear();
    show(result);
}

pub async fn recommend_feedback(
    ctx: &Context,
    user_id: Option<i64>,
    data: Option<String>,
    file: Option<PathBuf>,
) {
    if !ctx.enter(VIEW).await {
        return;
    }
    let Some(user_id) = ctx.user_id(user_id).await else {
        return;
    };
    let feedback = match payload(data, file).await {
        Ok(feedback) => feedback,
        Err(e) => return warning!("{}", e),
    };
    show(recommendation::save_recommendation_feedback(&ctx.client, user_id, &feedback).await);
}
