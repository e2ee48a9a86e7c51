//! Error types for Lodging Admin
//!
//! Centralized error handling using snafu. `Error` covers infrastructure
//! failures (files, config, HTTP, crypto), `StoreError` covers rejected
//! roster mutations and `AuthError` covers login outcomes.

use snafu::Snafu;

use crate::domain::auth::Role;
use crate::domain::maintenance::MaintenanceStatus;

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// HTTP client error
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// Sealing or opening a persisted secret failed
    #[snafu(display("Crypto error: {message}"))]
    Crypto { message: String },

    /// A roster mutation was rejected
    #[snafu(display("{source}"))]
    Store { source: StoreError },

    /// Login did not produce a session
    #[snafu(display("{source}"))]
    Auth { source: AuthError },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

impl From<StoreError> for Error {
    fn from(source: StoreError) -> Self {
        Error::Store { source }
    }
}

impl From<AuthError> for Error {
    fn from(source: AuthError) -> Self {
        Error::Auth { source }
    }
}

/// Collection an id refers to, used in `NotFound` errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Employee,
    Room,
    MaintenanceRecord,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Employee => "employee",
            Entity::Room => "room",
            Entity::MaintenanceRecord => "maintenance record",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure of a roster operation.
///
/// A failed operation never changes any collection.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum StoreError {
    /// A required field is missing or the request conflicts with current state
    #[snafu(display("Validation failed: {message}"))]
    Validation { message: String },

    /// Deleting the employee would orphan a room occupancy
    #[snafu(display(
        "Employee {employee_id} still occupies room {room_id} ({building} {room_number})"
    ))]
    ReferentialIntegrity {
        employee_id: u32,
        room_id: u32,
        building: String,
        room_number: String,
    },

    /// The target id does not exist
    #[snafu(display("No {entity} with id {id}"))]
    NotFound { entity: Entity, id: u32 },

    /// Maintenance status may only move one step forward
    #[snafu(display("Cannot move maintenance record {id} from {from} to {to}"))]
    InvalidTransition {
        id: u32,
        from: MaintenanceStatus,
        to: MaintenanceStatus,
    },
}

/// Outcome of a login attempt that did not yield a session
#[derive(Debug, Snafu)]
pub enum AuthError {
    /// Username or password left empty
    #[snafu(display("Username and password are required"))]
    MissingCredentials,

    /// The server or the local account table refused the credentials
    #[snafu(display("Invalid credentials: {message}"))]
    InvalidCredentials { message: String },

    /// The server answered with a non-success HTTP status
    #[snafu(display("Login failed with HTTP status {status}, try again later"))]
    LoginRejected { status: u16 },

    /// No saved session
    #[snafu(display("Not logged in, run `login` first"))]
    NotAuthenticated,

    /// The session's role does not allow the action
    #[snafu(display("Role '{role}' may not {action}"))]
    Forbidden { role: Role, action: String },
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Result of a roster operation
pub type StoreResult<T> = std::result::Result<T, StoreError>;
