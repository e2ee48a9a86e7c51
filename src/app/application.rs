//! Application - Command Dispatch
//!
//! Loads the roster from the snapshot directory, checks the saved session
//! against the page guard, runs one command and then drains the store's
//! event channel: changed collections are written back and notifications
//! are printed.

use std::io::Write;
use std::path::Path;

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use super::cli::{Command, EmployeeCommand, MaintenanceCommand, RoomCommand, merge_maintenance};
use super::navigation::{Access, Page, guard};
use super::views::{self, StatisticsView};
use crate::constants::RECENT_MAINTENANCE_LIMIT;
use crate::domain::auth::{LoginRequest, Permission, Session};
use crate::domain::config::AppConfig;
use crate::domain::employee::EmployeeFields;
use crate::domain::maintenance::MaintenanceFields;
use crate::error::{AuthError, Entity, Result};
use crate::eventing::StoreEvent;
use crate::i18n::{Locale, tr, tr_format};
use crate::services::{AuthService, SessionStore, SnapshotDir, block_on};
use crate::state::RosterStore;
use crate::state::query::{
    EmployeeFilter, MaintenanceFilter, RoomFilter, available_employees, filter_employees,
    filter_maintenance, filter_rooms,
};
use crate::state::report::{
    DashboardStats, employees_by_department, maintenance_by_month, maintenance_by_type,
    occupancy_by_building, recent_maintenance, rooms_by_type,
};

/// Page a command belongs to
fn page_of(command: &Command) -> Page {
    match command {
        Command::Login { .. } | Command::Logout | Command::Whoami => Page::Login,
        Command::Dashboard | Command::Reset => Page::Dashboard,
        Command::Employees(_) => Page::Employees,
        Command::Rooms(_) => Page::Accommodations,
        Command::Maintenance(_) => Page::Maintenance,
        Command::Stats => Page::Statistics,
    }
}

/// Mutating permission a command needs beyond opening its page
fn permission_of(command: &Command) -> Option<Permission> {
    match command {
        Command::Employees(EmployeeCommand::List { .. }) => None,
        Command::Employees(_) => Some(Permission::ManageEmployees),
        Command::Rooms(RoomCommand::Assign { .. } | RoomCommand::Unassign { .. }) => {
            Some(Permission::ManageRooms)
        }
        Command::Maintenance(MaintenanceCommand::Advance { .. }) => Some(Permission::AdvanceMaintenance),
        Command::Maintenance(
            MaintenanceCommand::Add { .. }
            | MaintenanceCommand::Edit { .. }
            | MaintenanceCommand::Delete { .. },
        ) => Some(Permission::ManageMaintenance),
        Command::Reset => Some(Permission::ResetData),
        _ => None,
    }
}

pub struct Application {
    config: AppConfig,
    locale: Locale,
    store: RosterStore,
    events: Receiver<StoreEvent>,
    snapshots: SnapshotDir,
    sessions: SessionStore,
}

impl Application {
    /// Open the roster in `data_dir` (or the configured / platform directory)
    pub fn new(config: AppConfig, data_dir: Option<&Path>, locale: Option<&str>) -> Result<Self> {
        let data_dir = data_dir.or(config.data_dir.as_deref());
        let snapshots = SnapshotDir::resolve(data_dir)?;
        Self::open(config, snapshots, locale)
    }

    pub fn open(config: AppConfig, snapshots: SnapshotDir, locale: Option<&str>) -> Result<Self> {
        let locale = Locale::resolve(locale.or(config.locale.as_deref()));
        let mut store = RosterStore::new(snapshots.load()?).with_locale(locale);
        let events = store.subscribe();
        let sessions = SessionStore::in_dir(snapshots.root());
        debug!(locale = locale.code(), dir = ?snapshots.root(), "Application opened");
        Ok(Self {
            config,
            locale,
            store,
            events,
            snapshots,
            sessions,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn session(&self) -> Result<Option<Session>> {
        self.sessions.load()
    }

    /// Resolve the session allowed to run `command`
    fn authorize(&self, command: &Command) -> Result<Option<Session>> {
        let session = self.session()?;
        match guard(session.as_ref(), page_of(command)) {
            Access::Granted => {}
            Access::RedirectToLogin => return Err(AuthError::NotAuthenticated.into()),
            Access::RedirectToDashboard => {
                let role = session.as_ref().map(|s| s.role).unwrap_or_default();
                return Err(AuthError::Forbidden {
                    role,
                    action: format!("open {}", page_of(command).path()),
                }
                .into());
            }
        }
        if let (Some(permission), Some(session)) = (permission_of(command), session.as_ref()) {
            if !session.can(permission) {
                return Err(AuthError::Forbidden {
                    role: session.role,
                    action: permission.as_str().to_string(),
                }
                .into());
            }
        }
        Ok(session)
    }

    /// Run one command, then persist and report whatever it changed
    pub fn run(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        let result = match self.authorize(&command) {
            Ok(session) => self.dispatch(command, session.as_ref(), out),
            Err(e) => Err(e),
        };
        self.flush(out)?;
        result
    }

    /// Drain pending store events
    fn flush(&mut self, out: &mut impl Write) -> Result<()> {
        let events: Vec<StoreEvent> = self.events.try_iter().collect();
        for event in events {
            for collection in event.affected() {
                self.snapshots.save(&self.store, *collection)?;
            }
            if let StoreEvent::Notify(notification) = &event {
                views::notification(out, notification)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: Command, session: Option<&Session>, out: &mut impl Write) -> Result<()> {
        let locale = self.locale;
        match command {
            Command::Login { username, password } => self.login(LoginRequest::new(username, password), out),
            Command::Logout => {
                self.sessions.clear()?;
                writeln!(out, "{}", tr(locale, "session.logged_out"))?;
                Ok(())
            }
            Command::Whoami => match session {
                Some(session) => views::session(out, locale, session),
                None => {
                    writeln!(out, "{}", tr(locale, "session.none"))?;
                    Ok(())
                }
            },
            Command::Dashboard => {
                let stats = DashboardStats::compute(
                    self.store.employees(),
                    self.store.rooms(),
                    self.store.maintenance_records(),
                );
                let recent = recent_maintenance(self.store.maintenance_records(), RECENT_MAINTENANCE_LIMIT);
                views::dashboard(out, locale, &stats, &recent, self.store.rooms())
            }
            Command::Employees(command) => self.employees(command, out),
            Command::Rooms(command) => self.rooms(command, out),
            Command::Maintenance(command) => self.maintenance(command, out),
            Command::Stats => {
                let by_department = employees_by_department(self.store.employees());
                let by_room_type = rooms_by_type(self.store.rooms());
                let occupancy = occupancy_by_building(self.store.rooms());
                let by_maintenance_type = maintenance_by_type(self.store.maintenance_records());
                let by_month = maintenance_by_month(self.store.maintenance_records());
                let view = StatisticsView {
                    by_department: &by_department,
                    by_room_type: &by_room_type,
                    occupancy: &occupancy,
                    by_maintenance_type: &by_maintenance_type,
                    by_month: &by_month,
                };
                views::statistics(out, locale, &view)
            }
            Command::Reset => {
                self.store.reset();
                Ok(())
            }
        }
    }

    fn login(&mut self, request: LoginRequest, out: &mut impl Write) -> Result<()> {
        let auth = AuthService::new(&self.config)?;
        info!(username = %request.username, endpoint = auth.endpoint(), "Logging in");
        let session = block_on(auth.login(&request))??;
        self.sessions.save(&session)?;

        let role = tr(self.locale, &format!("role.{}", session.role.as_str()));
        writeln!(
            out,
            "{}",
            tr_format(
                self.locale,
                "session.logged_in",
                &[("user", session.username.as_str()), ("role", role.as_str())],
            )
        )?;
        views::session(out, self.locale, &session)
    }

    // ==================== Pages ====================

    fn employees(&mut self, command: EmployeeCommand, out: &mut impl Write) -> Result<()> {
        match command {
            EmployeeCommand::List { search, department } => {
                let filter = EmployeeFilter { search, department };
                let list = filter_employees(self.store.employees(), &filter);
                views::employees(out, self.locale, &list, self.store.rooms())
            }
            EmployeeCommand::Add(args) => {
                self.store.add_employee(EmployeeFields::from(args))?;
                Ok(())
            }
            EmployeeCommand::Edit { id, changes } => {
                let Some(current) = self.store.employee(id).map(|e| e.fields()) else {
                    return self.store.missing(Entity::Employee, id).map_err(Into::into);
                };
                self.store.edit_employee(id, changes.apply(current))?;
                Ok(())
            }
            EmployeeCommand::Delete { id } => {
                self.store.delete_employee(id)?;
                Ok(())
            }
        }
    }

    fn rooms(&mut self, command: RoomCommand, out: &mut impl Write) -> Result<()> {
        match command {
            RoomCommand::List {
                search,
                building,
                status,
            } => {
                let filter = RoomFilter {
                    search,
                    building,
                    status,
                };
                let list = filter_rooms(self.store.rooms(), &filter);
                views::rooms(out, self.locale, &list, self.store.employees())
            }
            RoomCommand::Assign { room, employee } => {
                self.store.assign_room(room, Some(employee))?;
                Ok(())
            }
            RoomCommand::Unassign { room } => {
                self.store.unassign_room(room)?;
                Ok(())
            }
            RoomCommand::Available => {
                let list = available_employees(self.store.employees(), self.store.rooms());
                views::available(out, self.locale, &list)
            }
        }
    }

    fn maintenance(&mut self, command: MaintenanceCommand, out: &mut impl Write) -> Result<()> {
        match command {
            MaintenanceCommand::List { search, status, kind } => {
                let filter = MaintenanceFilter { search, status, kind };
                let list = filter_maintenance(
                    self.store.maintenance_records(),
                    self.store.rooms(),
                    &filter,
                );
                views::maintenance(out, self.locale, &list, self.store.rooms())
            }
            MaintenanceCommand::Add {
                room,
                kind,
                description,
                date,
            } => {
                let fields = MaintenanceFields {
                    room_id: room,
                    kind,
                    description,
                    report_date: date,
                };
                self.store.add_maintenance_record(fields)?;
                Ok(())
            }
            MaintenanceCommand::Edit {
                id,
                room,
                kind,
                description,
                date,
            } => {
                let Some(current) = self.store.maintenance_record(id).map(|r| r.fields()) else {
                    return self.store.missing(Entity::MaintenanceRecord, id).map_err(Into::into);
                };
                let fields = merge_maintenance(current, room, kind, description, date);
                self.store.edit_maintenance_record(id, fields)?;
                Ok(())
            }
            MaintenanceCommand::Delete { id } => {
                self.store.delete_maintenance_record(id)?;
                Ok(())
            }
            MaintenanceCommand::Advance { id, to } => {
                match to {
                    Some(next) => self.store.advance_maintenance_status(id, next)?,
                    None => {
                        self.store.advance(id)?;
                    }
                }
                Ok(())
            }
        }
    }
}
