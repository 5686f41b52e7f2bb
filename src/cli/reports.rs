use std::path::PathBuf;

use crate::{
    api::report,
    cli::{Context, show, spinner},
    types::Upload,
    warning,
};

pub async fn reports_list(ctx: &Context, user_id: Option<i64>) {
    if !ctx.enter("/reports").await {
        return;
    }
    let Some(user_id) = ctx.user_id(user_id).await else {
        return;
    };
    show(report::get_user_reports(&ctx.client, user_id).await);
}

pub async fn reports_show(ctx: &Context, report_id: i64) {
    if !ctx
        .enter(&format!("/report/{report_id}/interpretation"))
        .await
    {
        return;
    }
    show(report::get_report_detail(&ctx.client, report_id).await);
}

pub async fn reports_upload(ctx: &Context, user_id: Option<i64>, path: PathBuf) {
    if !ctx.enter("/reports").await {
        return;
    }
    let Some(user_id) = ctx.user_id(user_id).await else {
        return;
    };
    let upload = match Upload::from_path(&path).await {
        Ok(upload) => upload,
        Err(e) => return warning!("Cannot read {}: {}", path.display(), e),
    };

    let pb = spinner("Uploading report...");
    let result = report::upload_report(&ctx.client, user_id, upload).await;
    pb.finish_and_clear();
    show(result);
}
