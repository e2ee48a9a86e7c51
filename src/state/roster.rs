//! Roster - Pure Collection Transformations
//!
//! Every operation takes the current collections by reference and returns a
//! brand-new collection or a typed error. Inputs are never mutated, so a
//! rejected operation leaves the caller's snapshot exactly as it was.
//!
//! Invariants preserved by every function here:
//! - a room's status is assigned iff it has an occupant (derived, see `Room`)
//! - an employee occupies at most one room
//! - an employee who occupies a room cannot be deleted
//! - maintenance status only moves pending -> in_progress -> completed

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::employee::{Employee, EmployeeFields, EmployeeId};
use crate::domain::maintenance::{MaintenanceFields, MaintenanceRecord, MaintenanceStatus, RecordId};
use crate::domain::room::{Room, RoomId};
use crate::error::{Entity, StoreError, StoreResult};
use crate::helpers::is_blank;

// ==================== Helpers ====================

/// Next id for a collection: one above the current maximum, 1 when empty
pub fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> u32) -> StoreResult<u32> {
    items
        .iter()
        .map(id_of)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| validation("No ids left in this collection"))
}

fn validation(message: impl Into<String>) -> StoreError {
    StoreError::Validation {
        message: message.into(),
    }
}

fn not_found(entity: Entity, id: u32) -> StoreError {
    StoreError::NotFound { entity, id }
}

/// Room currently occupied by `employee_id`, if any
pub fn room_occupied_by(rooms: &[Room], employee_id: EmployeeId) -> Option<&Room> {
    rooms.iter().find(|r| r.occupant_id() == Some(employee_id))
}

/// Check that every occupant exists and lives in exactly one room
pub fn check_occupancy(employees: &[Employee], rooms: &[Room]) -> StoreResult<()> {
    for (index, room) in rooms.iter().enumerate() {
        let Some(occupant) = room.occupant_id() else {
            continue;
        };
        if !employees.iter().any(|e| e.id == occupant) {
            return Err(not_found(Entity::Employee, occupant));
        }
        if let Some(other) = rooms[..index].iter().find(|r| r.occupant_id() == Some(occupant)) {
            return Err(validation(format!(
                "Employee {occupant} occupies both room {} and room {}",
                other.id, room.id
            )));
        }
    }
    Ok(())
}

/// Replace the element with matching id, or report it missing
fn replace_by_id<T: Clone>(
    items: &[T],
    id: u32,
    id_of: impl Fn(&T) -> u32,
    entity: Entity,
    update: impl FnOnce(&T) -> StoreResult<T>,
) -> StoreResult<Vec<T>> {
    let index = items
        .iter()
        .position(|item| id_of(item) == id)
        .ok_or_else(|| not_found(entity, id))?;

    let replacement = update(&items[index])?;
    let mut next = items.to_vec();
    next[index] = replacement;
    Ok(next)
}

// ==================== Rooms ====================

/// Assign `employee_id` to the unassigned room `room_id`
pub fn assign_room(
    rooms: &[Room],
    employees: &[Employee],
    room_id: RoomId,
    employee_id: Option<EmployeeId>,
) -> StoreResult<Vec<Room>> {
    let employee_id = employee_id.ok_or_else(|| validation("No employee selected for assignment"))?;

    if !employees.iter().any(|e| e.id == employee_id) {
        return Err(not_found(Entity::Employee, employee_id));
    }

    if let Some(current) = room_occupied_by(rooms, employee_id) {
        return Err(validation(format!(
            "Employee {employee_id} already occupies room {} ({})",
            current.id,
            current.label()
        )));
    }

    replace_by_id(rooms, room_id, |r| r.id, Entity::Room, |room| {
        if let Some(occupant) = room.occupant_id() {
            return Err(validation(format!(
                "Room {} ({}) is already assigned to employee {occupant}",
                room.id,
                room.label()
            )));
        }
        debug!(room_id, employee_id, "Room assigned");
        Ok(room.assigned_to(employee_id))
    })
}

/// Clear the occupant of `room_id`. Unassigning an empty room is a no-op.
pub fn unassign_room(rooms: &[Room], room_id: RoomId) -> StoreResult<Vec<Room>> {
    replace_by_id(rooms, room_id, |r| r.id, Entity::Room, |room| Ok(room.vacated()))
}

// ==================== Employees ====================

/// Append a new employee, returning the new collection and the assigned id
pub fn add_employee(
    employees: &[Employee],
    fields: EmployeeFields,
) -> StoreResult<(Vec<Employee>, EmployeeId)> {
    if is_blank(&fields.name) {
        return Err(validation("Employee name is required"));
    }

    let id = next_id(employees, |e| e.id)?;
    let mut next = employees.to_vec();
    next.push(Employee::from_fields(id, fields));
    Ok((next, id))
}

/// Replace every field of employee `id` with `fields`
pub fn edit_employee(
    employees: &[Employee],
    id: EmployeeId,
    fields: EmployeeFields,
) -> StoreResult<Vec<Employee>> {
    if is_blank(&fields.name) {
        return Err(validation("Employee name is required"));
    }
    replace_by_id(employees, id, |e| e.id, Entity::Employee, |_| {
        Ok(Employee::from_fields(id, fields))
    })
}

/// Remove employee `id` unless they still occupy a room
pub fn delete_employee(
    employees: &[Employee],
    rooms: &[Room],
    id: EmployeeId,
) -> StoreResult<Vec<Employee>> {
    if !employees.iter().any(|e| e.id == id) {
        return Err(not_found(Entity::Employee, id));
    }

    if let Some(room) = room_occupied_by(rooms, id) {
        return Err(StoreError::ReferentialIntegrity {
            employee_id: id,
            room_id: room.id,
            building: room.building_name.clone(),
            room_number: room.room_number.clone(),
        });
    }

    Ok(employees.iter().filter(|e| e.id != id).cloned().collect())
}

// ==================== Maintenance ====================

fn validate_maintenance(fields: &MaintenanceFields) -> StoreResult<RoomId> {
    let room_id = fields.room_id.ok_or_else(|| validation("A room is required"))?;
    if is_blank(&fields.description) {
        return Err(validation("A description is required"));
    }
    Ok(room_id)
}

/// Append a pending record. `reportDate` defaults to `today`.
///
/// The room id is not checked against the room list; records may outlive rooms.
pub fn add_maintenance_record(
    records: &[MaintenanceRecord],
    fields: MaintenanceFields,
    today: NaiveDate,
) -> StoreResult<(Vec<MaintenanceRecord>, RecordId)> {
    let room_id = validate_maintenance(&fields)?;

    let id = next_id(records, |r| r.id)?;
    let mut next = records.to_vec();
    next.push(MaintenanceRecord {
        id,
        room_id,
        kind: fields.kind,
        description: fields.description,
        report_date: fields.report_date.unwrap_or(today),
        status: MaintenanceStatus::Pending,
        completion_date: None,
    });
    Ok((next, id))
}

/// Replace the descriptive fields of record `id`. Status is left untouched.
pub fn edit_maintenance_record(
    records: &[MaintenanceRecord],
    id: RecordId,
    fields: MaintenanceFields,
) -> StoreResult<Vec<MaintenanceRecord>> {
    let room_id = validate_maintenance(&fields)?;
    replace_by_id(records, id, |r| r.id, Entity::MaintenanceRecord, |current| {
        Ok(MaintenanceRecord {
            room_id,
            kind: fields.kind,
            description: fields.description,
            report_date: fields.report_date.unwrap_or(current.report_date),
            ..current.clone()
        })
    })
}

/// Remove record `id`
pub fn delete_maintenance_record(
    records: &[MaintenanceRecord],
    id: RecordId,
) -> StoreResult<Vec<MaintenanceRecord>> {
    if !records.iter().any(|r| r.id == id) {
        return Err(not_found(Entity::MaintenanceRecord, id));
    }
    Ok(records.iter().filter(|r| r.id != id).cloned().collect())
}

/// Move record `id` to `next`, which must be the direct successor of its status
pub fn advance_maintenance_status(
    records: &[MaintenanceRecord],
    id: RecordId,
    next: MaintenanceStatus,
    today: NaiveDate,
) -> StoreResult<Vec<MaintenanceRecord>> {
    replace_by_id(records, id, |r| r.id, Entity::MaintenanceRecord, |current| {
        if !current.status.can_advance_to(next) {
            return Err(StoreError::InvalidTransition {
                id,
                from: current.status,
                to: next,
            });
        }
        Ok(current.advanced_to(next, today))
    })
}

/// Move record `id` one step along the chain
pub fn advance(
    records: &[MaintenanceRecord],
    id: RecordId,
    today: NaiveDate,
) -> StoreResult<Vec<MaintenanceRecord>> {
    let current = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found(Entity::MaintenanceRecord, id))?;

    match current.status.next() {
        Some(next) => advance_maintenance_status(records, id, next, today),
        None => Err(StoreError::InvalidTransition {
            id,
            from: current.status,
            to: current.status,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::RoomStatus;
    use crate::domain::seed;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("date")
    }

    fn employee(id: EmployeeId) -> Employee {
        Employee::from_fields(id, EmployeeFields::new(format!("emp{id}"), "技术部", "工程师", format!("EMP{id:03}")))
    }

    fn room(id: RoomId) -> Room {
        Room::new(id, "A栋", 1, format!("A10{id}"), "单人间", "")
    }

    fn assert_invariants(rooms: &[Room]) {
        let mut seen = std::collections::HashSet::new();
        for room in rooms {
            assert_eq!(room.status() == RoomStatus::Assigned, room.occupant_id().is_some());
            if let Some(occupant) = room.occupant_id() {
                assert!(seen.insert(occupant), "employee {occupant} occupies two rooms");
            }
        }
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id::<Employee>(&[], |e| e.id), Ok(1));
        assert_eq!(next_id(&[employee(3), employee(9), employee(2)], |e| e.id), Ok(10));
    }

    #[test]
    fn test_next_id_exhausted() {
        let err = add_employee(&[employee(u32::MAX)], EmployeeFields::new("新同事", "", "", ""))
            .expect_err("no ids left");
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    #[test]
    fn test_check_occupancy() {
        let employees = vec![employee(7), employee(8)];
        check_occupancy(&employees, &[room(1).with_occupant(7), room(2).with_occupant(8), room(3)])
            .expect("consistent");

        let err = check_occupancy(&employees, &[room(1).with_occupant(7), room(2).with_occupant(7)])
            .expect_err("two rooms");
        assert!(matches!(err, StoreError::Validation { .. }));

        let err = check_occupancy(&employees, &[room(1).with_occupant(9)]).expect_err("unknown occupant");
        assert_eq!(
            err,
            StoreError::NotFound {
                entity: Entity::Employee,
                id: 9
            }
        );
    }

    #[test]
    fn test_assign_then_delete_then_unassign_scenario() {
        let rooms = vec![room(1)];
        let employees = vec![employee(7)];

        let rooms = assign_room(&rooms, &employees, 1, Some(7)).expect("assign");
        assert_eq!(rooms[0].status(), RoomStatus::Assigned);
        assert_eq!(rooms[0].occupant_id(), Some(7));

        let err = delete_employee(&employees, &rooms, 7).expect_err("occupied");
        assert!(matches!(err, StoreError::ReferentialIntegrity { room_id: 1, employee_id: 7, .. }));
        assert!(err.to_string().contains("A101"));

        let rooms = unassign_room(&rooms, 1).expect("unassign");
        assert_eq!(rooms[0].status(), RoomStatus::Unassigned);
        assert_eq!(rooms[0].occupant_id(), None);

        let employees = delete_employee(&employees, &rooms, 7).expect("delete");
        assert!(employees.is_empty());
    }

    #[test]
    fn test_assign_requires_employee() {
        let rooms = vec![room(1)];
        let err = assign_room(&rooms, &[employee(1)], 1, None).expect_err("no employee");
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    #[test]
    fn test_assign_rejects_employee_with_room() {
        let rooms = vec![room(1).with_occupant(4), room(2)];
        let employees = vec![employee(4)];
        let err = assign_room(&rooms, &employees, 2, Some(4)).expect_err("double occupancy");
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_invariants(&rooms);
    }

    #[test]
    fn test_assign_rejects_occupied_room() {
        let rooms = vec![room(1).with_occupant(4)];
        let employees = vec![employee(4), employee(5)];
        let err = assign_room(&rooms, &employees, 1, Some(5)).expect_err("occupied");
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_eq!(rooms[0].occupant_id(), Some(4));
    }

    #[test]
    fn test_assign_unknown_ids() {
        let rooms = vec![room(1)];
        let employees = vec![employee(1)];
        assert_eq!(
            assign_room(&rooms, &employees, 9, Some(1)),
            Err(StoreError::NotFound { entity: Entity::Room, id: 9 })
        );
        assert_eq!(
            assign_room(&rooms, &employees, 1, Some(42)),
            Err(StoreError::NotFound { entity: Entity::Employee, id: 42 })
        );
    }

    #[test]
    fn test_unassign_round_trip_for_any_employee() {
        let base = vec![room(1), room(2)];
        let employees: Vec<_> = (1..=5).map(employee).collect();
        for e in &employees {
            let assigned = assign_room(&base, &employees, 1, Some(e.id)).expect("assign");
            assert_invariants(&assigned);
            let back = unassign_room(&assigned, 1).expect("unassign");
            assert_eq!(back, base);
        }
    }

    #[test]
    fn test_unassign_empty_room_is_noop_and_unknown_is_error() {
        let rooms = vec![room(1)];
        assert_eq!(unassign_room(&rooms, 1).expect("noop"), rooms);
        assert!(matches!(unassign_room(&rooms, 2), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_seed_operations_keep_invariants() {
        let employees = seed::employees();
        let mut rooms = seed::rooms();
        assert_invariants(&rooms);

        // Every employee without a room may take room 1; only one succeeds at a time.
        for e in &employees {
            if let Ok(next) = assign_room(&rooms, &employees, 1, Some(e.id)) {
                assert_invariants(&next);
                rooms = unassign_room(&next, 1).expect("unassign");
            }
        }
        assert_eq!(rooms, seed::rooms());
    }

    #[test]
    fn test_add_employee_assigns_next_id() {
        let employees = vec![employee(1), employee(5)];
        let (next, id) =
            add_employee(&employees, EmployeeFields::new("新人", "市场部", "专员", "EMP011")).expect("add");
        assert_eq!(id, 6);
        assert_eq!(next.len(), 3);
        assert_eq!(next[2].name, "新人");
        assert_eq!(employees.len(), 2);
    }

    #[test]
    fn test_add_employee_requires_name() {
        let err = add_employee(&[], EmployeeFields::new("  ", "", "", "")).expect_err("blank");
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    #[test]
    fn test_add_employee_allows_duplicate_code() {
        let employees = vec![employee(1)];
        let (next, _) =
            add_employee(&employees, EmployeeFields::new("dup", "", "", "EMP001")).expect("add");
        assert_eq!(next.iter().filter(|e| e.employee_id == "EMP001").count(), 2);
    }

    #[test]
    fn test_edit_employee_replaces_fields() {
        let employees = vec![employee(1), employee(2)];
        let next = edit_employee(&employees, 2, EmployeeFields::new("改名", "财务部", "会计", "EMP099"))
            .expect("edit");
        assert_eq!(next[1].id, 2);
        assert_eq!(next[1].name, "改名");
        assert_eq!(next[1].department, "财务部");
        assert_eq!(next[0], employees[0]);

        let err = edit_employee(&employees, 3, EmployeeFields::new("x", "", "", "")).expect_err("missing");
        assert_eq!(err, StoreError::NotFound { entity: Entity::Employee, id: 3 });
    }

    #[test]
    fn test_delete_unknown_employee() {
        assert!(matches!(
            delete_employee(&[employee(1)], &[], 2),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_maintenance_defaults_and_full_chain() {
        let (records, id) =
            add_maintenance_record(&[], MaintenanceFields::new(3, "", "leak"), day(10)).expect("add");
        assert_eq!(id, 1);
        assert_eq!(records[0].report_date, day(10));
        assert_eq!(records[0].status, MaintenanceStatus::Pending);

        let records = advance(&records, id, day(11)).expect("first advance");
        assert_eq!(records[0].status, MaintenanceStatus::InProgress);
        assert_eq!(records[0].completion_date, None);

        let records = advance(&records, id, day(12)).expect("second advance");
        assert_eq!(records[0].status, MaintenanceStatus::Completed);
        assert_eq!(records[0].completion_date, Some(day(12)));

        let err = advance(&records, id, day(13)).expect_err("completed is final");
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
        assert_eq!(records[0].status, MaintenanceStatus::Completed);
    }

    #[test]
    fn test_advance_rejects_skips_and_regressions() {
        let (records, id) =
            add_maintenance_record(&[], MaintenanceFields::new(1, "", "door"), day(1)).expect("add");

        for target in [MaintenanceStatus::Pending, MaintenanceStatus::Completed] {
            let err = advance_maintenance_status(&records, id, target, day(2)).expect_err("illegal");
            assert_eq!(
                err,
                StoreError::InvalidTransition { id, from: MaintenanceStatus::Pending, to: target }
            );
        }

        let records =
            advance_maintenance_status(&records, id, MaintenanceStatus::InProgress, day(2)).expect("ok");
        let err = advance_maintenance_status(&records, id, MaintenanceStatus::Pending, day(3))
            .expect_err("regression");
        assert!(matches!(err, StoreError::InvalidTransition { .. }));

        assert!(matches!(advance(&records, 99, day(3)), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_add_maintenance_validation() {
        let missing_room = MaintenanceFields {
            room_id: None,
            description: "leak".into(),
            ..Default::default()
        };
        assert!(matches!(
            add_maintenance_record(&[], missing_room, day(1)),
            Err(StoreError::Validation { .. })
        ));
        assert!(matches!(
            add_maintenance_record(&[], MaintenanceFields::new(1, "", " "), day(1)),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_add_maintenance_keeps_explicit_date() {
        let fields = MaintenanceFields::new(2, "水电维修", "pipe").reported_on(day(3));
        let (records, _) = add_maintenance_record(&seed::maintenance_records(), fields, day(20)).expect("add");
        let added = records.last().expect("record");
        assert_eq!(added.id, 16);
        assert_eq!(added.report_date, day(3));
    }

    #[test]
    fn test_edit_maintenance_keeps_status() {
        let (records, id) =
            add_maintenance_record(&[], MaintenanceFields::new(1, "其他", "crack"), day(1)).expect("add");
        let records = advance(&records, id, day(2)).expect("advance");

        let edited = edit_maintenance_record(&records, id, MaintenanceFields::new(5, "门窗维修", "window"))
            .expect("edit");
        assert_eq!(edited[0].status, MaintenanceStatus::InProgress);
        assert_eq!(edited[0].room_id, 5);
        assert_eq!(edited[0].description, "window");
        assert_eq!(edited[0].report_date, day(1));

        assert!(matches!(
            edit_maintenance_record(&records, 2, MaintenanceFields::new(1, "", "x")),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_maintenance_record() {
        let records = seed::maintenance_records();
        let next = delete_maintenance_record(&records, 4).expect("delete");
        assert_eq!(next.len(), 14);
        assert!(next.iter().all(|r| r.id != 4));
        assert!(matches!(delete_maintenance_record(&next, 4), Err(StoreError::NotFound { .. })));
    }
}
