use crate::{
    api::auth,
    cli::{Context, print_json, show},
    router::{self, HOME_PATH, LOGIN_PATH},
    success,
    types::RegisterRequest,
    warning,
};

pub async fn login(ctx: &Context, username: &str, password: &str, redirect: Option<String>) {
    let pb = super::spinner("Signing in...");
    let result = auth::login(&ctx.client, username, password).await;
    pb.finish_and_clear();

    match result {
        Ok(_) => {
            let destination = match redirect {
                Some(path) => router::post_login_destination(&router::login_redirect(&path)),
                None => HOME_PATH.to_string(),
            };
            if let Some(found) = ctx.router.resolve(&destination) {
                success!("Continue with: {} ({})", found.route.title, destination);
            }
        }
        Err(e) => warning!("Login failed: {}", e),
    }
}

pub async fn logout(ctx: &Context) {
    if let Err(e) = auth::logout(&ctx.client).await {
        warning!("Failed to clear session: {}", e);
    }
}

pub async fn whoami(ctx: &Context) {
    if !ctx.enter("/profile").await {
        return;
    }
    show(auth::current_user(&ctx.client).await);
}

pub async fn register(ctx: &Context, username: String, email: String, password: String) {
    if !ctx.enter(LOGIN_PATH).await {
        return;
    }
    let request = RegisterRequest {
        username,
        email,
        password,
    };
    match auth::register(&ctx.client, &request).await {
        Ok(user) => {
            success!("Registered {}", request.username);
            print_json(&user);
        }
        Err(e) if e.is_http() => {}
        Err(e) => warning!("{}", e),
    }
}

pub async fn refresh(ctx: &Context) {
    match auth::refresh_token(&ctx.client).await {
        Ok(_) => success!("Session token refreshed"),
        Err(e) if e.is_http() => {}
        Err(e) => warning!("{}", e),
    }
}

pub async fn request_reset(ctx: &Context, email: &str) {
    show(auth::request_password_reset(&ctx.client, email).await);
}

pub async fn reset(ctx: &Context, token: &str, new_password: &str) {
    show(auth::reset_password(&ctx.client, token, new_password).await);
}

pub async fn change_password(ctx: &Context, old_password: &str, new_password: &str) {
    if !ctx.enter("/settings").await {
        return;
    }
    show(auth::change_password(&ctx.client, old_password, new_password).await);
}
