//! CLI - Command Tree
//!
//! One subcommand group per page. Edit commands take optional flags and
//! leave unspecified fields as they are.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::employee::EmployeeFields;
use crate::domain::maintenance::{MaintenanceFields, MaintenanceStatus};
use crate::domain::room::RoomStatus;

#[derive(Debug, Parser)]
#[command(name = "lodging-admin", version, about = "Employee lodging and maintenance administration")]
pub struct Cli {
    /// Config file (defaults to lodging-admin.toml in the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for collection snapshots and the session file
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Message language: en or zh-CN
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the current user, role and accessible pages
    Whoami,
    /// Totals and the most recent maintenance tickets
    Dashboard,
    /// Staff roster
    #[command(subcommand)]
    Employees(EmployeeCommand),
    /// Rooms and assignments
    #[command(subcommand)]
    Rooms(RoomCommand),
    /// Repair tickets
    #[command(subcommand)]
    Maintenance(MaintenanceCommand),
    /// Group counts and occupancy per building
    Stats,
    /// Restore the seed data
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// List employees
    List {
        /// Substring of the name or staff code
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        department: Option<String>,
    },
    /// Add an employee
    Add(EmployeeArgs),
    /// Edit an employee
    Edit {
        id: u32,
        #[command(flatten)]
        changes: EmployeeChanges,
    },
    /// Delete an employee who holds no room
    Delete { id: u32 },
}

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub department: String,
    #[arg(long, default_value = "")]
    pub position: String,
    /// Staff code, e.g. EMP011
    #[arg(long, default_value = "")]
    pub code: String,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub age: Option<u8>,
    #[arg(long)]
    pub phone: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub entry_date: Option<NaiveDate>,
}

impl From<EmployeeArgs> for EmployeeFields {
    fn from(args: EmployeeArgs) -> Self {
        Self {
            name: args.name,
            department: args.department,
            position: args.position,
            employee_id: args.code,
            gender: args.gender,
            age: args.age,
            phone: args.phone,
            entry_date: args.entry_date,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct EmployeeChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub age: Option<u8>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub entry_date: Option<NaiveDate>,
}

impl EmployeeChanges {
    /// Overlay the given flags on `current`
    pub fn apply(self, mut current: EmployeeFields) -> EmployeeFields {
        if let Some(name) = self.name {
            current.name = name;
        }
        if let Some(department) = self.department {
            current.department = department;
        }
        if let Some(position) = self.position {
            current.position = position;
        }
        if let Some(code) = self.code {
            current.employee_id = code;
        }
        if self.gender.is_some() {
            current.gender = self.gender;
        }
        if self.age.is_some() {
            current.age = self.age;
        }
        if self.phone.is_some() {
            current.phone = self.phone;
        }
        if self.entry_date.is_some() {
            current.entry_date = self.entry_date;
        }
        current
    }
}

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// List rooms
    List {
        /// Substring of the room number
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        building: Option<String>,
        /// unassigned or assigned
        #[arg(long)]
        status: Option<RoomStatus>,
    },
    /// Put an employee into an unassigned room
    Assign { room: u32, employee: u32 },
    /// Vacate a room
    Unassign { room: u32 },
    /// Employees without a room
    Available,
}

#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// List tickets
    List {
        /// Substring of the description or room label
        #[arg(short, long, default_value = "")]
        search: String,
        /// pending, in_progress or completed
        #[arg(long)]
        status: Option<MaintenanceStatus>,
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Report an issue
    Add {
        #[arg(long)]
        room: Option<u32>,
        #[arg(long = "type", default_value = "")]
        kind: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Report date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Edit a ticket's room, type, description or date
    Edit {
        id: u32,
        #[arg(long)]
        room: Option<u32>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a ticket
    Delete { id: u32 },
    /// Move a ticket to its next status
    Advance {
        id: u32,
        /// Expected next status; rejected unless it directly follows the current one
        #[arg(long)]
        to: Option<MaintenanceStatus>,
    },
}

/// Overlay optional maintenance flags on the stored fields
pub fn merge_maintenance(
    current: MaintenanceFields,
    room: Option<u32>,
    kind: Option<String>,
    description: Option<String>,
    date: Option<NaiveDate>,
) -> MaintenanceFields {
    MaintenanceFields {
        room_id: room.or(current.room_id),
        kind: kind.unwrap_or(current.kind),
        description: description.unwrap_or(current.description),
        report_date: date.or(current.report_date),
    }
}
