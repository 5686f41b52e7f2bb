use std::path::PathBuf;

use crate::{
    api::user_portrait,
    cli::{Context, payload, show},
    warning,
};

const VIEW: &str = "/questionnaire";

pub async fn portrait_progress(ctx: &Context) {
    if ctx.enter(VIEW).await {
        show(user_portrait::get_progress(&ctx.client).await);
    }
}

pub async fn portrait_step(
    ctx: &Context,
    step: &str,
    data: Option<String>,
    file: Option<PathBuf>,
) {
    if !ctx.enter(VIEW).await {
        return;
    }
    let body = match payload(data, file).await {
        Ok(body) => body,
        Err(e) => return warning!("{}", e),
    };
    show(user_portrait::submit_step(&ctx.client, step, body).await);
}

pub async fn portrait_answer(ctx: &Context, answer: &str) {
    if ctx.enter(VIEW).await {
        show(user_portrait::submit_dynamic_answer(&ctx.client, answer).await);
    }
}

pub async fn portrait_skip(ctx: &Context) {
    if ctx.enter(VIEW).await {
        show(user_portrait::skip_step(&ctx.client).await);
    }
}

pub async fn portrait_reset(ctx: &Context) {
    if ctx.enter(VIEW).await {
        show(user_portrait::reset_questionnaire(&ctx.client).await);
    }
}

pub async fn portrait_steps(ctx: &Context) {
    if ctx.enter(VIEW).await {
        show(user_portrait::get_all_steps(&ctx.client).await);
    }
}

pub async fn portrait_status(ctx: &Context) {
    if ctx.enter(VIEW).await {
        show(user_portrait::get_flow_status(&ctx.client).await);
    }
}

pub async fn portrait_show(ctx: &Context) {
    if ctx.enter("/portrait-result").await {
        show(user_portrait::get_user_portrait(&ctx.client).await);
    }
}

pub async fn portrait_symptoms(ctx: &Context) {
    if ctx.enter("/portrait-result").await {
        show(user_portrait::get_user_symptoms(&ctx.client).await);
    }
}

pub async fn portrait_update(ctx: &Context, data: Option<String>, file: Option<PathBuf>) {
    if !ctx.enter("/portrait-result").await {
        return;
    }
    let body = match payload(data, file).await {
        Ok(body) => body,
        Err(e) => return warning!("{}", e),
    };
    show(user_portrait::update_user_portrait(&ctx.client, &body).await);
}
