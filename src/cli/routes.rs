use tabled::Table;

use crate::{
    cli::Context,
    config, info,
    router::Navigation,
    success,
    types::RouteTableRow,
    warning,
};

pub fn list_routes(ctx: &Context) {
    let rows: Vec<RouteTableRow> = ctx
        .router
        .routes()
        .iter()
        .map(|r| RouteTableRow {
            path: r.path.to_string(),
            name: r.name.to_string(),
            title: r.title.to_string(),
            auth: if r.requires_auth { "yes" } else { "no" }.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Navigates to `path` and, when allowed, optionally opens the view in the
/// web frontend.
pub async fn open(ctx: &Context, path: &str, browser: bool) {
    let target = match ctx.router.navigate(path, ctx.client.session()).await {
        Navigation::Allowed {
            route, full_path, ..
        } => {
            success!("{} -> {}", full_path, route.title);
            full_path
        }
        Navigation::Redirected { to, from } => {
            warning!("{} requires a signed-in session, redirected to {}", from, to);
            to
        }
        Navigation::Unmatched { full_path } => {
            warning!("No view is registered for {}", full_path);
            return;
        }
    };

    if browser {
        let url = format!("{}{}", config::web_url().trim_end_matches('/'), target);
        if webbrowser::open(&url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            );
        } else {
            info!("Opened {}", url);
        }
    }
}
