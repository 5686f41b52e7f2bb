use serde_json::Value;

use crate::{
    client::{self, ApiClient, ApiRequest},
    error::{Error, Result},
    events::{ClientEvent, NavigationReason},
    router::LOGIN_PATH,
    types::{PasswordChange, PasswordReset, PasswordResetRequest, RegisterRequest, TokenResponse},
};

/// Exchanges username and password for a bearer token and stores it.
///
/// The token endpoint expects form encoding. A rejected login is returned to
/// the caller as is; it does not clear the session or emit a redirect.
///
/// # Arguments
///
/// * `client` - The shared API client; its session receives the token
/// * `username` - Account name, also remembered when the backend omits it
/// * `password` - Plain-text password, sent form-encoded
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(TokenResponse)` - The issued token, already stored in the session
/// - `Err(Error::Unauthorized)` - Wrong credentials
/// - `Err(Error)` - Any other transport or backend failure
///
/// On success a [`ClientEvent::LoggedIn`] is published.
///
/// # Example
///
/// ```
/// let token = auth::login(&client, "jxw123", "123456").await?;
/// let me = auth::current_user(&client).await?;
/// ```
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenResponse> {
    let request =
        ApiRequest::post("/auth/token").form([("username", username), ("password", password)]);
    let token: TokenResponse = client::decode(client.send_unhandled(request).await?)?;

    let username = token
        .username
        .clone()
        .unwrap_or_else(|| username.to_string());
    client
        .session()
        .sign_in(
            token.access_token.clone(),
            Some(username.clone()),
            token.user_id,
        )
        .await?;
    client.events().emit(ClientEvent::LoggedIn {
        username: Some(username),
    });

    Ok(token)
}

/// Creates an account. Does not sign in.
///
/// # Arguments
///
/// * `client` - The shared API client
/// * `user` - Username, email and password of the new account
///
/// # Returns
///
/// The created user as the backend describes it, or a `Validation` error
/// when the username or email is taken.
pub async fn register(client: &ApiClient, user: &RegisterRequest) -> Result<Value> {
    client.post("/auth/register", user).await
}

/// The user behind the current token.
pub async fn current_user(client: &ApiClient) -> Result<Value> {
    client.get("/auth/me").await
}

/// Drops the session and asks for the login view. Safe to call repeatedly.
pub async fn logout(client: &ApiClient) -> Result<()> {
    client.session().clear().await?;
    client
        .events()
        .navigate(LOGIN_PATH, NavigationReason::LoggedOut);
    Ok(())
}

/// Trades the current token for a new one. Never called automatically.
///
/// If the refresh fails the session is logged out before the error is
/// returned. A 401 has already cleared it through the client.
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(String)` - The new access token, already stored in the session
/// - `Err(Error::Unauthorized)` - The old token was rejected
/// - `Err(Error)` - Any other failure, after a logout
///
/// # Example
///
/// ```
/// match auth::refresh_token(&client).await {
///     Ok(_) => success!("Session token refreshed"),
///     Err(e) => warning!("{}", e),
/// }
/// ```
pub async fn refresh_token(client: &ApiClient) -> Result<String> {
    let token = match client
        .send_as::<TokenResponse>(ApiRequest::post("/auth/refresh"))
        .await
    {
        Ok(token) => token,
        Err(Error::Unauthorized) => return Err(Error::Unauthorized),
        Err(err) => {
            if let Err(e) = logout(client).await {
                tracing::warn!(error = %e, "logout after failed refresh");
            }
            return Err(err);
        }
    };

    client
        .session()
        .set_token(token.access_token.clone())
        .await?;
    Ok(token.access_token)
}

/// Asks the backend to mail a reset token to `email`.
pub async fn request_password_reset(client: &ApiClient, email: &str) -> Result<Value> {
    let body = PasswordResetRequest {
        email: email.to_string(),
    };
    client.post("/auth/password-reset-request", &body).await
}

/// Sets a new password using a token from [`request_password_reset`].
pub async fn reset_password(client: &ApiClient, token: &str, new_password: &str) -> Result<Value> {
    let body = PasswordReset {
        token: token.to_string(),
        new_password: new_password.to_string(),
    };
    client.post("/auth/password-reset", &body).await
}

/// Changes the signed-in user's password.
///
/// # Arguments
///
/// * `client` - The shared API client, carrying the bearer token
/// * `old_password` - The current password
/// * `new_password` - The replacement
pub async fn change_password(
    client: &ApiClient,
    old_password: &str,
    new_password: &str,
) -> Result<Value> {
    let body = PasswordChange {
        old_password: old_password.to_string(),
        new_password: new_password.to_string(),
    };
    client.post("/auth/change-password", &body).await
}
