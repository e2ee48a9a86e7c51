//! Constants
//!
//! Shared names and limits used across the application.

/// Application name, used for the log file prefix and the CLI
pub const APP_NAME: &str = "lodging-admin";

/// Rolling log file prefix inside the log directory
pub const LOG_FILE_PREFIX: &str = "lodging-admin.log";

/// Number of tickets shown in the dashboard's recent list
pub const RECENT_MAINTENANCE_LIMIT: usize = 5;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "LODGING_ADMIN_LOG";
