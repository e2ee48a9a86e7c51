//! Auth Service - Login and Session Persistence
//!
//! Credentials are POSTed to the configured endpoint. When the server cannot
//! be reached (or answers with something that is not a login response) the
//! local account table from the config is consulted instead.
//!
//! The role always comes from the server or the account table. Users unknown
//! to both get `staff`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::auth::{LoginRequest, LoginResponse, Role, Session};
use crate::domain::config::AppConfig;
use crate::error::{AuthError, Result};
use crate::helpers::{is_blank, open, remove_if_exists, seal, write_atomic};

/// What the remote endpoint said
enum RemoteOutcome {
    Answered(LoginResponse),
    Rejected(u16),
}

/// Login client
pub struct AuthService {
    client: reqwest::Client,
    endpoint: String,
    config: AppConfig,
}

impl AuthService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.login.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.login.endpoint.clone(),
            config: config.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Authenticate and build a session
    pub async fn login(&self, request: &LoginRequest) -> std::result::Result<Session, AuthError> {
        if is_blank(&request.username) || request.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        match self.remote_login(request).await {
            Ok(RemoteOutcome::Rejected(status)) => {
                warn!(status, endpoint = %self.endpoint, "Login endpoint rejected the request");
                Err(AuthError::LoginRejected { status })
            }
            Ok(RemoteOutcome::Answered(response)) if response.success => {
                let role = response
                    .role
                    .unwrap_or_else(|| self.local_role(&request.username));
                info!(username = %request.username, role = %role, "Login accepted by server");
                Ok(Session::new(request.username.clone(), role))
            }
            Ok(RemoteOutcome::Answered(response)) => {
                warn!(username = %request.username, "Login refused by server");
                Err(AuthError::InvalidCredentials {
                    message: response
                        .message
                        .unwrap_or_else(|| "Wrong username or password".to_string()),
                })
            }
            Err(e) => {
                warn!(error = %e, endpoint = %self.endpoint, "Login server unavailable, using local accounts");
                self.local_login(request)
            }
        }
    }

    async fn remote_login(&self, request: &LoginRequest) -> std::result::Result<RemoteOutcome, reqwest::Error> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(RemoteOutcome::Rejected(status.as_u16()));
        }
        Ok(RemoteOutcome::Answered(response.json().await?))
    }

    fn local_role(&self, username: &str) -> Role {
        self.config
            .account(username)
            .map(|a| a.role)
            .unwrap_or_default()
    }

    fn local_login(&self, request: &LoginRequest) -> std::result::Result<Session, AuthError> {
        match self.config.account(&request.username) {
            Some(account) if account.password == request.password => {
                info!(username = %account.username, role = %account.role, "Local login accepted");
                Ok(Session::new(account.username.clone(), account.role))
            }
            _ => Err(AuthError::InvalidCredentials {
                message: "Wrong username or password".to_string(),
            }),
        }
    }
}

/// Sealed session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub const FILE_NAME: &'static str = "session";

    /// Session file inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let sealed = seal(&serde_json::to_string(session)?)?;
        write_atomic(&self.path, sealed.as_bytes())
    }

    /// Current session. Missing, unreadable or tampered files mean logged out.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let sealed = std::fs::read_to_string(&self.path)?;
        let session = open(&sealed)
            .ok()
            .and_then(|plain| serde_json::from_str::<Session>(&plain).ok());
        if session.is_none() {
            warn!(path = ?self.path, "Discarding unreadable session file");
            remove_if_exists(&self.path)?;
        }
        Ok(session)
    }

    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)
    }
}
