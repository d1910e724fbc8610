//! HandMixed DJ Studio Backend Library
//!
//! This library implements the server side of the HandMixed browser DJ studio.
//! A logged-in user connects their Spotify account through an OAuth 2.0
//! authorization-code flow, browses their playlists, and controls playback on
//! a device connected via the Spotify Web Playback SDK. The open Audius
//! catalog provides no-auth track discovery for the second deck.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web server
//! - `audius` - Audius catalog client (trending, search, track reshaping)
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared across the auth and proxy layers
//! - `guard` - Session token guard for protected proxy calls
//! - `oauth` - Provider seam and the authorization-code exchange service
//! - `server` - The axum web server and route table
//! - `session` - Browser-session state and the session store
//! - `spotify` - Spotify Web API client (auth, catalog, player)
//! - `types` - Data structures and type definitions
//! - `users` - Local user records keyed by external account id
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use handmixed::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> handmixed::Res<()> {
//!     config::load_env().await?;
//!     server::start_server(server::AppState::new()).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod audius;
pub mod config;
pub mod error;
pub mod guard;
pub mod oauth;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod users;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use handmixed::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// info!("Retrieved {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("User {} authenticated", username);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination, such as startup failures.
///
/// Request handlers must never call this macro; recoverable upstream
/// failures are reported with `warning!` and surfaced to the client as
/// structured JSON errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to bind server address: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program
/// termination. Used for recoverable issues such as failed upstream calls.
///
/// # Example
///
/// ```
/// warning!("Token exchange failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
