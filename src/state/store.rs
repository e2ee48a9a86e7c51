//! RosterStore - Explicit Store Object
//!
//! Owns the employee, room and maintenance snapshots. Every mutation runs a
//! pure function from `roster`, swaps the affected snapshot only on success
//! and publishes `StoreEvent`s to subscribers.

use chrono::{Local, NaiveDate};
use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::roster;
use crate::domain::employee::{Employee, EmployeeFields, EmployeeId};
use crate::domain::maintenance::{MaintenanceFields, MaintenanceRecord, MaintenanceStatus, RecordId};
use crate::domain::room::{Room, RoomId};
use crate::domain::seed;
use crate::error::{Entity, StoreError, StoreResult};
use crate::eventing::{Collection, StoreEvent};
use crate::i18n::{Locale, tr, tr_format};

/// Full value of the three collections at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub employees: Vec<Employee>,
    #[serde(rename = "accommodations")]
    pub rooms: Vec<Room>,
    pub maintenance_records: Vec<MaintenanceRecord>,
}

impl RosterSnapshot {
    /// Fixed seed data
    pub fn seed() -> Self {
        Self {
            employees: seed::employees(),
            rooms: seed::rooms(),
            maintenance_records: seed::maintenance_records(),
        }
    }
}

impl Default for RosterSnapshot {
    fn default() -> Self {
        Self::seed()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Single-owner store. Mutations take `&mut self` and run to completion.
pub struct RosterStore {
    employees: Vec<Employee>,
    rooms: Vec<Room>,
    records: Vec<MaintenanceRecord>,
    locale: Locale,
    clock: fn() -> NaiveDate,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new(RosterSnapshot::seed())
    }
}

impl RosterStore {
    pub fn new(snapshot: RosterSnapshot) -> Self {
        Self {
            employees: snapshot.employees,
            rooms: snapshot.rooms,
            records: snapshot.maintenance_records,
            locale: Locale::default(),
            clock: today,
            subscribers: Vec::new(),
        }
    }

    /// Locale used for notification messages
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Override the date source used for report and completion dates
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Subscribe to store events
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: StoreEvent) {
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ==================== Getters ====================

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn maintenance_records(&self) -> &[MaintenanceRecord] {
        &self.records
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn maintenance_record(&self, id: RecordId) -> Option<&MaintenanceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Clone of the current collections
    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            employees: self.employees.clone(),
            rooms: self.rooms.clone(),
            maintenance_records: self.records.clone(),
        }
    }

    // ==================== Outcome handling ====================

    fn succeed(&mut self, collection: Collection, message: String) {
        info!(collection = collection.key(), "{message}");
        self.publish(StoreEvent::changed(collection));
        self.publish(StoreEvent::success(message));
    }

    fn fail<T>(&mut self, error: StoreError) -> StoreResult<T> {
        warn!(error = %error, "Store operation rejected");
        let message = self.failure_message(&error);
        self.publish(StoreEvent::error(message));
        Err(error)
    }

    /// Reject a request that names an id the store does not hold
    pub fn missing<T>(&mut self, entity: Entity, id: u32) -> StoreResult<T> {
        self.fail(StoreError::NotFound { entity, id })
    }

    /// Localized text for a rejected operation
    pub fn failure_message(&self, error: &StoreError) -> String {
        match error {
            StoreError::Validation { message } => {
                tr_format(self.locale, "error.validation", &[("message", message.as_str())])
            }
            StoreError::ReferentialIntegrity {
                building,
                room_number,
                ..
            } => tr_format(
                self.locale,
                "error.employee_has_room",
                &[("building", building.as_str()), ("room", room_number.as_str())],
            ),
            StoreError::NotFound { entity, id } => tr_format(
                self.locale,
                "error.not_found",
                &[("entity", entity.as_str()), ("id", id.to_string().as_str())],
            ),
            StoreError::InvalidTransition { from, to, .. } => tr_format(
                self.locale,
                "error.invalid_transition",
                &[
                    ("from", tr(self.locale, from.label_key()).as_str()),
                    ("to", tr(self.locale, to.label_key()).as_str()),
                ],
            ),
        }
    }

    // ==================== Rooms ====================

    /// Assign an employee to an unassigned room
    pub fn assign_room(&mut self, room_id: RoomId, employee_id: Option<EmployeeId>) -> StoreResult<()> {
        match roster::assign_room(&self.rooms, &self.employees, room_id, employee_id) {
            Ok(rooms) => {
                self.rooms = rooms;
                let label = self.room_label(room_id);
                let name = employee_id
                    .and_then(|id| self.employee(id))
                    .map(|e| e.name.clone())
                    .unwrap_or_default();
                let message = tr_format(
                    self.locale,
                    "notify.room_assigned",
                    &[("room", label.as_str()), ("name", name.as_str())],
                );
                self.succeed(Collection::Rooms, message);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Clear the occupant of a room
    pub fn unassign_room(&mut self, room_id: RoomId) -> StoreResult<()> {
        match roster::unassign_room(&self.rooms, room_id) {
            Ok(rooms) => {
                self.rooms = rooms;
                let label = self.room_label(room_id);
                let message = tr_format(self.locale, "notify.room_unassigned", &[("room", label.as_str())]);
                self.succeed(Collection::Rooms, message);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn room_label(&self, room_id: RoomId) -> String {
        self.room(room_id).map(Room::label).unwrap_or_default()
    }

    // ==================== Employees ====================

    /// Add an employee and return the assigned id
    pub fn add_employee(&mut self, fields: EmployeeFields) -> StoreResult<EmployeeId> {
        let name = fields.name.clone();
        match roster::add_employee(&self.employees, fields) {
            Ok((employees, id)) => {
                self.employees = employees;
                let message = tr_format(self.locale, "notify.employee_added", &[("name", name.as_str())]);
                self.succeed(Collection::Employees, message);
                Ok(id)
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn edit_employee(&mut self, id: EmployeeId, fields: EmployeeFields) -> StoreResult<()> {
        let name = fields.name.clone();
        match roster::edit_employee(&self.employees, id, fields) {
            Ok(employees) => {
                self.employees = employees;
                let message = tr_format(self.locale, "notify.employee_updated", &[("name", name.as_str())]);
                self.succeed(Collection::Employees, message);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Delete an employee who holds no room
    pub fn delete_employee(&mut self, id: EmployeeId) -> StoreResult<()> {
        let name = self.employee(id).map(|e| e.name.clone()).unwrap_or_default();
        match roster::delete_employee(&self.employees, &self.rooms, id) {
            Ok(employees) => {
                self.employees = employees;
                let message = tr_format(self.locale, "notify.employee_deleted", &[("name", name.as_str())]);
                self.succeed(Collection::Employees, message);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    // ==================== Maintenance ====================

    /// Report a new issue; it starts as pending
    pub fn add_maintenance_record(&mut self, fields: MaintenanceFields) -> StoreResult<RecordId> {
        let today = (self.clock)();
        match roster::add_maintenance_record(&self.records, fields, today) {
            Ok((records, id)) => {
                self.records = records;
                let message = tr_format(
                    self.locale,
                    "notify.maintenance_added",
                    &[("id", id.to_string().as_str())],
                );
                self.succeed(Collection::MaintenanceRecords, message);
                Ok(id)
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn edit_maintenance_record(&mut self, id: RecordId, fields: MaintenanceFields) -> StoreResult<()> {
        match roster::edit_maintenance_record(&self.records, id, fields) {
            Ok(records) => {
                self.records = records;
                let message = tr_format(
                    self.locale,
                    "notify.maintenance_updated",
                    &[("id", id.to_string().as_str())],
                );
                self.succeed(Collection::MaintenanceRecords, message);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn delete_maintenance_record(&mut self, id: RecordId) -> StoreResult<()> {
        match roster::delete_maintenance_record(&self.records, id) {
            Ok(records) => {
                self.records = records;
                let message = tr_format(
                    self.locale,
                    "notify.maintenance_deleted",
                    &[("id", id.to_string().as_str())],
                );
                self.succeed(Collection::MaintenanceRecords, message);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Move a record to `next`, which must directly follow its current status
    pub fn advance_maintenance_status(&mut self, id: RecordId, next: MaintenanceStatus) -> StoreResult<()> {
        let today = (self.clock)();
        let result = roster::advance_maintenance_status(&self.records, id, next, today);
        self.apply_advance(id, result)
    }

    /// Move a record one step along its status chain and return the new status
    pub fn advance(&mut self, id: RecordId) -> StoreResult<MaintenanceStatus> {
        let today = (self.clock)();
        let result = roster::advance(&self.records, id, today);
        self.apply_advance(id, result)?;
        self.maintenance_record(id)
            .map(|r| r.status)
            .ok_or(StoreError::NotFound {
                entity: Entity::MaintenanceRecord,
                id,
            })
    }

    fn apply_advance(&mut self, id: RecordId, result: StoreResult<Vec<MaintenanceRecord>>) -> StoreResult<()> {
        match result {
            Ok(records) => {
                self.records = records;
                let status = self
                    .maintenance_record(id)
                    .map(|r| tr(self.locale, r.status.label_key()))
                    .unwrap_or_default();
                let message = tr_format(
                    self.locale,
                    "notify.maintenance_advanced",
                    &[("id", id.to_string().as_str()), ("status", status.as_str())],
                );
                self.succeed(Collection::MaintenanceRecords, message);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    // ==================== Reset ====================

    /// Restore the fixed seed data for all collections
    pub fn reset(&mut self) {
        let seed = RosterSnapshot::seed();
        self.employees = seed.employees;
        self.rooms = seed.rooms;
        self.records = seed.maintenance_records;
        info!("Store reset to seed data");
        self.publish(StoreEvent::Reset);
        let message = tr(self.locale, "notify.reset");
        self.publish(StoreEvent::success(message));
    }
}
