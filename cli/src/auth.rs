//! Credential resolution and session setup

use crate::client::ControllerClient;
use crate::error::{Error, Result};
use crate::prompt::dialog_error;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variables checked for a token, in priority order
pub const TOKEN_ENV_VARS: [&str; 2] = ["X_AUTH_TOKEN", "AUTH_TOKEN"];

/// Interactive login attempts before giving up
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Where the credentials for this run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Argument(String),
    File(PathBuf),
    Env { var: &'static str, token: String },
    Interactive,
}

impl TokenSource {
    /// Pick the first available source: argument, file, env vars, then
    /// interactive login. Empty values are treated as unset.
    pub fn resolve<F>(token: Option<&str>, token_file: Option<&Path>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            return TokenSource::Argument(token.trim().to_string());
        }
        if let Some(path) = token_file {
            return TokenSource::File(path.to_path_buf());
        }
        for var in TOKEN_ENV_VARS {
            if let Some(token) = env(var).filter(|t| !t.trim().is_empty()) {
                return TokenSource::Env {
                    var,
                    token: token.trim().to_string(),
                };
            }
        }
        TokenSource::Interactive
    }

    /// Resolve using the process environment
    pub fn from_env(token: Option<&str>, token_file: Option<&Path>) -> Self {
        Self::resolve(token, token_file, |var| std::env::var(var).ok())
    }

    /// The static token, reading the token file if needed.
    /// `None` means interactive login.
    pub fn token(&self) -> Result<Option<String>> {
        match self {
            TokenSource::Argument(token) | TokenSource::Env { token, .. } => Ok(Some(token.clone())),
            TokenSource::File(path) => read_token_file(path).map(Some),
            TokenSource::Interactive => Ok(None),
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Argument(_) => write!(f, "Authenticating using Auth-Token from CLI ARGS"),
            TokenSource::File(path) => {
                write!(f, "Authenticating using Auth-Token from file {}", path.display())
            }
            TokenSource::Env { var, .. } => {
                write!(f, "Authenticating using environment variable {}", var)
            }
            TokenSource::Interactive => write!(f, "Authenticating using interactive login"),
        }
    }
}

/// Read and trim a token file
pub fn read_token_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::TokenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let token = content.trim();
    if token.is_empty() {
        return Err(Error::Auth(format!("token file {} is empty", path.display())));
    }
    Ok(token.to_string())
}

/// Supplies email/password for interactive login
pub trait CredentialPrompt {
    fn credentials(&mut self) -> Result<(String, String)>;
}

/// Terminal prompt backed by dialoguer
pub struct TerminalCredentials;

impl CredentialPrompt for TerminalCredentials {
    fn credentials(&mut self) -> Result<(String, String)> {
        let theme = ColorfulTheme::default();
        let email: String = Input::with_theme(&theme)
            .with_prompt("email")
            .interact_text()
            .map_err(dialog_error)?;
        let password = Password::with_theme(&theme)
            .with_prompt("password")
            .interact()
            .map_err(dialog_error)?;
        Ok((email, password))
    }
}

/// Authenticated session state
#[derive(Debug, Clone)]
pub struct Session {
    pub tenant_id: String,
    /// Session token came from an interactive login and should be logged out
    pub interactive: bool,
}

/// Establish a tenant session on `client` from `source`
pub async fn authenticate(
    client: &mut ControllerClient,
    source: &TokenSource,
    prompt: &mut dyn CredentialPrompt,
) -> Result<Session> {
    println!("AUTHENTICATING...");
    println!("     {}", source);

    let session = match source.token()? {
        Some(token) => {
            client.set_token(token);
            let tenant_id = fetch_tenant_id(client).await.map_err(|e| {
                Error::Auth(format!("AUTH_TOKEN login failure, please check token ({})", e))
            })?;
            Session {
                tenant_id,
                interactive: false,
            }
        }
        None => interactive_login(client, prompt).await?,
    };

    client.set_tenant_id(session.tenant_id.clone());
    println!("     SUCCESS: Authentication Complete");
    tracing::info!(tenant_id = %session.tenant_id, "authenticated");
    Ok(session)
}

async fn interactive_login(
    client: &mut ControllerClient,
    prompt: &mut dyn CredentialPrompt,
) -> Result<Session> {
    for attempt in 1..=MAX_LOGIN_ATTEMPTS {
        let (email, password) = prompt.credentials()?;
        let outcome = match client.login(&email, &password).await {
            Ok(token) => {
                client.set_token(token);
                fetch_tenant_id(client).await
            }
            Err(e) => Err(e),
        };
        match outcome {
            Ok(tenant_id) => {
                return Ok(Session {
                    tenant_id,
                    interactive: true,
                })
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "interactive login failed");
                println!("     Login failed: {}", e);
            }
        }
    }
    Err(Error::Auth(format!(
        "giving up after {} failed login attempts",
        MAX_LOGIN_ATTEMPTS
    )))
}

async fn fetch_tenant_id(client: &ControllerClient) -> Result<String> {
    client
        .profile()
        .await?
        .tenant_id
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Auth("profile has no tenant id".into()))
}
