use std::path::PathBuf;

use crate::{
    api::health_info,
    cli::{Context, payload, show, spinner},
    types::Upload,
    warning,
};

const VIEW: &str = "/profile";

pub async fn health_show(ctx: &Context, user_id: Option<i64>) {
    if !ctx.enter(VIEW).await {
        return;
    }
    let Some(user_id) = ctx.user_id(user_id).await else {
        return;
    };
    show(health_info::get_user_health_info(&ctx.client, user_id).await);
}

pub async fn health_submit(ctx: &Context, data: Option<String>, file: Option<PathBuf>) {
    if !ctx.enter(VIEW).await {
        return;
    }
    let body = match payload(data, file).await {
        Ok(body) => body,
        Err(e) => return warning!("{}", e),
    };
    show(health_info::submit_health_info(&ctx.client, &body).await);
}

pub async fn health_update(
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
    let body = match payload(data, file).await {
        Ok(body) => body,
        Err(e) => return warning!("{}", e),
    };
    show(health_info::update_user_health_info(&ctx.client, user_id, &body).await);
}

pub async fn health_upload(ctx: &Context, path: PathBuf) {
    if !ctx.enter("/reports").await {
        return;
    }
    let upload = match Upload::from_path(&path).await {
        Ok(upload) => upload,
        Err(e) => return warning!("Cannot read {}: {}", path.display(), e),
    };

    let pb = spinner("Uploading medical report...");
    let result = health_info::upload_medical_report(&ctx.client, upload).await;
    pb.finish_and_clear();
    show(result);
}

pub async fn health_portrait(ctx: &Context) {
    if !ctx.enter("/portrait-result").await {
        return;
    }
    let pb = spinner("Generating user portrait...");
    let result = health_info::generate_user_portrait(&ctx.client).await;
    pb.finish_and_clear();
    show(result);
}
