//! Health Checkup Client Library
//!
//! Client layer for the hospital health-checkup recommendation service. It
//! wraps the backend's REST API behind typed functions, keeps the session
//! credential, and owns the route table whose guard decides which views a
//! session may enter.
//!
//! # Modules
//!
//! - `api` - Domain API functions grouped by backend resource
//! - `cli` - Command-line interface implementations
//! - `client` - The shared HTTP client, its interceptors and response handling
//! - `config` - Configuration management and environment variables
//! - `error` - Failure taxonomy
//! - `events` - Session controller event bus
//! - `router` - Route table and navigation guard
//! - `session` - The persisted session credential
//! - `types` - Request and response payloads
//!
//! # Example
//!
//! ```
//! use checkupcli::{api, client::ApiClient, config::ClientConfig, session::Session};
//!
//! #[tokio::main]
//! async fn main() -> checkupcli::Result<()> {
//!     let client = ApiClient::builder(ClientConfig::from_env())
//!         .session(Session::in_memory())
//!         .build()?;
//!     api::auth::login(&client, "jxw123", "123456").await?;
//!     let me = api::auth::current_user(&client).await?;
//!     println!("{me}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod router;
pub mod session;
pub mod types;

pub use error::{Error, Result};

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Found {} reports", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// Only for failures the binary cannot continue from, such as an unreadable
/// session file at start-up.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!`. Used for rejected input and
/// recoverable command failures.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
