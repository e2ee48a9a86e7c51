//! Auth - Roles, Login Payloads and Sessions

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role. Decided by the server or the local account table, never by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role may perform `permission`
    pub fn permits(&self, permission: Permission) -> bool {
        match permission {
            Permission::AdvanceMaintenance => true,
            Permission::ManageEmployees
            | Permission::ManageRooms
            | Permission::ManageMaintenance
            | Permission::ResetData => self.is_admin(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Mutating capabilities gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Add, edit and delete employees
    ManageEmployees,
    /// Assign and unassign rooms
    ManageRooms,
    /// Add, edit and delete maintenance records
    ManageMaintenance,
    /// Move a maintenance record along its status chain
    AdvanceMaintenance,
    /// Restore seed data
    ResetData,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageEmployees => "manage employees",
            Permission::ManageRooms => "manage rooms",
            Permission::ManageMaintenance => "manage maintenance records",
            Permission::AdvanceMaintenance => "advance maintenance records",
            Permission::ResetData => "reset data",
        }
    }
}

/// Body POSTed to the login endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            role,
            issued_at: Utc::now(),
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.role.permits(permission)
    }
}
