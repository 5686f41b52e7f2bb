use std::path::PathBuf;

use crate::{
    api::{user, user_profile},
    cli::{Context, payload, show},
    warning,
};

const VIEW: &str = "/user-profile";

pub async fn user_show(ctx: &Context, user_id: Option<i64>) {
    if !ctx.enter("/profile").await {
        return;
    }
    if let Some(user_id) = ctx.user_id(user_id).await {
        show(user::get_user_profile(&ctx.client, user_id).await);
    }
}

pub async fn user_update(
    ctx: &Context,
    user_id: Option<i64>,
    data: Option<String>,
    file: Option<PathBuf>,
) {
    if !ctx.enter("/profile").await {
        return;
    }
    let Some(user_id) = ctx.user_id(user_id).await else {
        return;
    };
    let body = match payload(data, file).await {
        Ok(body) => body,
        Err(e) => return warning!("{}", e),
    };
    show(user::update_user_profile(&ctx.client, user_id, &body).await);
}

pub async fn profile_init(ctx: &Context) {
    if ctx.enter(VIEW).await {
        show(user_profile::initialize_profile(&ctx.client).await);
    }
}

pub async fn profile_process(ctx: &Context, data: Option<String>, file: Option<PathBuf>) {
    if !ctx.enter(VIEW).await {
        return;
    }
    match payload(data, file).await {
        Ok(body) => show(user_profile::process_input(&ctx.client, &body).await),
        Err(e) => warning!("{}", e),
    }
}

pub async fn profile_save(ctx: &Context, data: Option<String>, file: Option<PathBuf>) {
    if !ctx.enter(VIEW).await {
        return;
    }
    match payload(data, file).await {
        Ok(body) => show(user_profile::save_profile(&ctx.client, &body).await),
        Err(e) => warning!("{}", e),
    }
}

pub async fn profile_show(ctx: &Context) {
    if ctx.enter(VIEW).await {
        show(user_profile::get_profile(&ctx.client).await);
    }
}

pub async fn profile_update(
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
    match payload(data, file).await {
        Ok(body) => show(user_profile::update_profile(&ctx.client, user_id, &body).await),
        Err(e) => warning!("{}", e),
    }
}

pub async fn profile_questions(ctx: &Context, symptom: &str) {
    if ctx.enter(VIEW).await {
        show(user_profile::get_symptom_follow_up_questions(&ctx.client, symptom).await);
    }
}

pub async fn profile_history(ctx: &Context) {
    if ctx.enter("/chat").await {
        show(user_profile::get_conversation_history(&ctx.client).await);
    }
}

pub async fn profile_clear_history(ctx: &Context) {
    if ctx.enter("/chat").await {
        show(user_profile::clear_conversation_history(&ctx.client).await);
    }
}
