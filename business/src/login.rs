//! Login form state and the login/logout commands.
//!
//! Credentials are posted to the authenticate endpoint. On success the
//! issued tokens go into [`Session`], the password field is cleared and the
//! route switches to [`Route::Home`]. Failures are shown as one of three
//! canned messages, see [`LoginFailure`].

use std::any::Any;

use console_states::{Command, CommandFuture, CommandSnapshot, State, Updater, snapshot_clone};
use log::{error, info, warn};

use crate::api::ApiClient;
use crate::{ApiError, BusinessConfig, EntityTablesState, Route, Session};

/// Editable login form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    /// Persist the session across restarts.
    pub remember_me: bool,
}

impl Default for LoginInput {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            remember_me: true,
        }
    }
}

impl State for LoginInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Idle,
    Authenticating,
    Authenticated {
        username: String,
    },
    /// Message shown under the form.
    Failed(String),
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self, Self::Authenticating)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl State for AuthStatus {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// User-facing category of a failed login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    InvalidCredentials,
    Network,
    Server,
}

const CREDENTIAL_HINTS: [&str; 3] = ["invalid username", "invalid password", "unauthorized"];
const NETWORK_HINTS: [&str; 2] = ["network error", "failed to fetch"];

impl LoginFailure {
    /// Typed errors first; anything else falls back to matching the message.
    pub fn classify(err: &ApiError) -> Self {
        match err {
            ApiError::Http {
                status: 401 | 403, ..
            } => Self::InvalidCredentials,
            ApiError::Network(_) => Self::Network,
            other => Self::classify_message(&other.to_string()),
        }
    }

    /// Case-insensitive substring match on a raw error message. Unknown
    /// wording is reported as a server error.
    pub fn classify_message(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if CREDENTIAL_HINTS.iter().any(|hint| lower.contains(hint)) {
            Self::InvalidCredentials
        } else if NETWORK_HINTS.iter().any(|hint| lower.contains(hint)) {
            Self::Network
        } else {
            Self::Server
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid username or password. Please try again.",
            Self::Network => "Network error. Check your internet connection.",
            Self::Server => "Server error. Please try again later.",
        }
    }
}

/// Required-field check, run before any request.
pub fn validate_input(input: &LoginInput) -> Result<(), ApiError> {
    if input.username.trim().is_empty() {
        return Err(ApiError::Validation("Username is required".to_owned()));
    }
    if input.password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_owned()));
    }
    Ok(())
}

/// Posts the credentials in [`LoginInput`].
///
/// Dispatch explicitly via `ctx.dispatch::<LoginCommand>()`.
#[derive(Debug, Default)]
pub struct LoginCommand;

impl Command for LoginCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let input = snap.state::<LoginInput>();
        let config = snap.state::<BusinessConfig>();

        if let Err(err) = validate_input(&input) {
            info!("LoginCommand: {err}");
            updater.set(AuthStatus::Failed(err.to_string()));
            return Box::pin(async {});
        }

        updater.set(AuthStatus::Authenticating);
        let client = ApiClient::new(config.api_base_url, Session::default());

        Box::pin(async move {
            let username = input.username.trim().to_owned();
            let result = client
                .authenticate(&username, &input.password)
                .await
                .and_then(|tokens| match tokens.token {
                    Some(token) if !token.is_empty() => Ok((token, tokens.refresh_token)),
                    _ => Err(ApiError::MalformedResponse(
                        "authenticate response has no token".to_owned(),
                    )),
                });

            match result {
                Ok((token, refresh_token)) => {
                    info!("LoginCommand: '{username}' signed in");
                    let remember = input.remember_me;
                    updater.update::<Session>(move |session| {
                        session.sign_in(token, refresh_token, remember);
                    });
                    updater.update::<LoginInput>(|input| input.password.clear());
                    updater.set(AuthStatus::Authenticated { username });
                    updater.set(Route::Home);
                }
                Err(err) => {
                    let failure = LoginFailure::classify(&err);
                    match failure {
                        LoginFailure::Server => error!("LoginCommand: {err}"),
                        _ => warn!("LoginCommand: {err}"),
                    }
                    updater.set(AuthStatus::Failed(failure.message().to_owned()));
                }
            }
        })
    }
}

/// Drops the session and every cached table, then returns to the login page.
#[derive(Debug, Default)]
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn run(&self, _snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        info!("LogoutCommand: user logged out");
        updater.update::<Session>(Session::sign_out);
        updater.update::<EntityTablesState>(EntityTablesState::reset);
        updater.set(AuthStatus::Idle);
        updater.set(Route::Login);
        Box::pin(async {})
    }
}
