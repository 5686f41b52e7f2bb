//! # CLI Module
//!
//! Command implementations behind the `checkupcli` binary. Every command that
//! maps onto a protected view first passes through the route guard, so an
//! unauthenticated user is pointed at `checkupcli login` before any request
//! leaves the machine.
//!
//! Commands never print errors that came from the HTTP layer themselves; the
//! client already announced them on the event bus and [`Context::flush_events`]
//! renders those once the command returns.

mod auth;
mod health;
mod portrait;
mod profile;
mod recommend;
mod reports;
mod routes;

pub use auth::{change_password, login, logout, refresh, register, request_reset, reset, whoami};
pub use health::{health_portrait, health_show, health_submit, health_update, health_upload};
pub use portrait::{
    portrait_answer, portrait_progress, portrait_reset, portrait_show, portrait_skip,
    portrait_status, portrait_step, portrait_steps, portrait_symptoms, portrait_update,
};
pub use profile::{
    profile_clear_history, profile_history, profile_init, profile_process, profile_questions,
    profile_save, profile_show, profile_update, user_show, user_update,
};
pub use recommend::{recommend, recommend_feedback};
pub use reports::{reports_list, reports_show, reports_upload};
pub use routes::{list_routes, open};

use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tokio::sync::broadcast::{Receiver, error::TryRecvError};

use crate::{
    client::ApiClient,
    error::{Error, Result},
    events::{ClientEvent, Level, NavigationReason},
    router::{Navigation, Router},
    success, warning,
};

/// Everything a command needs: the configured client and the route table.
pub struct Context {
    pub client: ApiClient,
    pub router: Router,
    events: Receiver<ClientEvent>,
}

impl Context {
    pub fn new(client: ApiClient, router: Router) -> Self {
        let events = client.events().subscribe();
        Self {
            client,
            router,
            events,
        }
    }

    /// Runs the route guard for `path`. Returns `false` (after telling the
    /// user why) when the command must not proceed.
    pub async fn enter(&self, path: &str) -> bool {
        match self.router.navigate(path, self.client.session()).await {
            Navigation::Allowed { route, .. } => {
                tracing::debug!(view = route.view, "entering {}", route.title);
                true
            }
            Navigation::Redirected { to, from } => {
                warning!(
                    "{} requires a signed-in session. Run `checkupcli login <username> --redirect '{}'` ({})",
                    from,
                    from,
                    to
                );
                false
            }
            Navigation::Unmatched { full_path } => {
                warning!("No view is registered for {}", full_path);
                false
            }
        }
    }

    /// The explicit `--user-id`, or the id remembered from login.
    pub async fn user_id(&self, explicit: Option<i64>) -> Option<i64> {
        match explicit {
            Some(id) => Some(id),
            None => {
                let id = self.client.session().user_id().await;
                if id.is_none() {
                    warning!("Unknown user id. Pass --user-id.");
                }
                id
            }
        }
    }

    /// Prints the events the client published while the command ran.
    pub fn flush_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => render_event(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "dropped client events");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}

fn render_event(event: ClientEvent) {
    match event {
        ClientEvent::Notify { level, message } => match level {
            Level::Warning => warning!("{}", message),
            Level::Error => error_line(&message),
        },
        ClientEvent::Navigate {
            to,
            reason: NavigationReason::SessionExpired,
        } => warning!(
            "Session expired. Sign in again with `checkupcli login` ({})",
            to
        ),
        ClientEvent::Navigate {
            reason: NavigationReason::LoggedOut,
            ..
        } => success!("Signed out"),
        ClientEvent::LoggedIn { username } => {
            success!("Signed in as {}", username.unwrap_or_default())
        }
    }
}

fn error_line(message: &str) {
    use colored::Colorize;
    eprintln!("[{}] {}", "x".red().bold(), message);
}

/// Prints successful data as pretty JSON. HTTP failures were already
/// announced by the client; local ones are printed here.
pub(crate) fn show(result: Result<Value>) {
    match result {
        Ok(value) => print_json(&value),
        Err(e) if e.is_http() => tracing::debug!(error = %e, "command failed"),
        Err(e) => warning!("{}", e),
    }
}

pub(crate) fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => warning!("Failed to render response: {}", e),
    }
}

/// Reads a JSON payload from `--data` or `--file`; `--data` wins.
pub(crate) async fn payload(data: Option<String>, file: Option<PathBuf>) -> Result<Value> {
    let text = match (data, file) {
        (Some(data), _) => data,
        (None, Some(path)) => async_fs::read_to_string(path).await?,
        (None, None) => {
            return Err(Error::Validation(
                "a JSON payload is required (--data or --file)".to_string(),
            ));
        }
    };
    Ok(serde_json::from_str(&text)?)
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
