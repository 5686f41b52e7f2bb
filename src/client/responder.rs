use crate::{
    error::Error,
    events::{EventBus, Level, NavigationReason},
    router::LOGIN_PATH,
    session::Session,
};

pub const MSG_FORBIDDEN: &str = "Access denied";
pub const MSG_NOT_FOUND: &str = "The requested resource does not exist";
pub const MSG_SERVER_ERROR: &str = "Internal server error";
pub const MSG_NETWORK: &str = "Network error, please check your connection";

/// Performs the side effect that belongs to a failed request and hands the
/// same error back to the caller.
///
/// 401 clears the session and asks for the login view; everything else is a
/// notification. Rejected input is a warning, the rest are errors.
pub async fn respond(err: Error, session: &Session, events: &EventBus) -> Error {
    tracing::warn!(error = %err, "request failed");

    match &err {
        Error::Unauthorized => {
            if let Err(e) = session.clear().await {
                tracing::warn!(error = %e, "failed to clear session after 401");
            }
            events.navigate(LOGIN_PATH, NavigationReason::SessionExpired);
        }
        Error::Forbidden => events.notify(Level::Error, MSG_FORBIDDEN),
        Error::NotFound => events.notify(Level::Error, MSG_NOT_FOUND),
        Error::Server { status: 500, .. } => events.notify(Level::Error, MSG_SERVER_ERROR),
        Error::Server { message, .. } => events.notify(Level::Error, message.as_str()),
        Error::Network(_) => events.notify(Level::Error, MSG_NETWORK),
        Error::Validation(message) => events.notify(Level::Warning, message.as_str()),
        Error::Storage(_) | Error::Serialization(_) | Error::Config(_) => {}
    }

    err
}
