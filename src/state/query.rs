//! Query - Derived Views Over the Roster
//!
//! Read-only search, filters and lookups. Nothing here mutates.

use crate::domain::employee::{Employee, EmployeeId};
use crate::domain::maintenance::{MaintenanceRecord, MaintenanceStatus};
use crate::domain::room::{Room, RoomId, RoomStatus};
use crate::helpers::contains_ignore_case;

/// Label shown for a record whose room no longer exists
pub const UNKNOWN_ROOM: &str = "unknown";

/// Room list filter. Empty search and `None` filters match everything.
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    /// Substring of the room number
    pub search: String,
    pub building: Option<String>,
    pub status: Option<RoomStatus>,
}

/// Employee list filter
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Substring of the name or staff code
    pub search: String,
    pub department: Option<String>,
}

/// Maintenance list filter
#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    /// Substring of the description or the room label
    pub search: String,
    pub status: Option<MaintenanceStatus>,
    pub kind: Option<String>,
}

pub fn filter_rooms<'a>(rooms: &'a [Room], filter: &RoomFilter) -> Vec<&'a Room> {
    rooms
        .iter()
        .filter(|r| contains_ignore_case(&r.room_number, &filter.search))
        .filter(|r| filter.building.as_ref().is_none_or(|b| &r.building_name == b))
        .filter(|r| filter.status.is_none_or(|s| r.status() == s))
        .collect()
}

pub fn filter_employees<'a>(employees: &'a [Employee], filter: &EmployeeFilter) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|e| {
            contains_ignore_case(&e.name, &filter.search)
                || contains_ignore_case(&e.employee_id, &filter.search)
        })
        .filter(|e| filter.department.as_ref().is_none_or(|d| &e.department == d))
        .collect()
}

pub fn filter_maintenance<'a>(
    records: &'a [MaintenanceRecord],
    rooms: &[Room],
    filter: &MaintenanceFilter,
) -> Vec<&'a MaintenanceRecord> {
    records
        .iter()
        .filter(|m| {
            contains_ignore_case(&m.description, &filter.search)
                || contains_ignore_case(&searchable_room_label(rooms, m.room_id), &filter.search)
        })
        .filter(|m| filter.status.is_none_or(|s| m.status == s))
        .filter(|m| filter.kind.as_ref().is_none_or(|k| &m.kind == k))
        .collect()
}

/// Room label matched by search; empty when the room is gone
fn searchable_room_label(rooms: &[Room], room_id: RoomId) -> String {
    rooms
        .iter()
        .find(|r| r.id == room_id)
        .map(Room::label)
        .unwrap_or_default()
}

/// `"<building> <roomNumber>"`, or [`UNKNOWN_ROOM`] when the room is gone
pub fn room_label(rooms: &[Room], room_id: RoomId) -> String {
    rooms
        .iter()
        .find(|r| r.id == room_id)
        .map(Room::label)
        .unwrap_or_else(|| UNKNOWN_ROOM.to_string())
}

/// Distinct values in first-seen order
pub fn distinct<'a, T>(items: &'a [T], key: impl Fn(&'a T) -> &'a str) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in items.iter().map(key) {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

pub fn buildings(rooms: &[Room]) -> Vec<&str> {
    distinct(rooms, |r| r.building_name.as_str())
}

pub fn departments(employees: &[Employee]) -> Vec<&str> {
    distinct(employees, |e| e.department.as_str())
}

pub fn maintenance_kinds(records: &[MaintenanceRecord]) -> Vec<&str> {
    distinct(records, |m| m.kind.as_str())
}

/// Statuses present in `records`, first-seen order
pub fn maintenance_statuses(records: &[MaintenanceRecord]) -> Vec<MaintenanceStatus> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.status) {
            seen.push(record.status);
        }
    }
    seen
}

/// Employees that occupy no room
pub fn available_employees<'a>(employees: &'a [Employee], rooms: &[Room]) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|e| !rooms.iter().any(|r| r.occupant_id() == Some(e.id)))
        .collect()
}

/// Occupant of `room`, if the room is assigned and the employee exists
pub fn occupant_of<'a>(employees: &'a [Employee], room: &Room) -> Option<&'a Employee> {
    let occupant = room.occupant_id()?;
    employees.iter().find(|e| e.id == occupant)
}

/// Room occupied by employee `id`
pub fn room_of(rooms: &[Room], id: EmployeeId) -> Option<&Room> {
    rooms.iter().find(|r| r.occupant_id() == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    #[test]
    fn test_room_search_and_filters() {
        let rooms = seed::rooms();

        let filter = RoomFilter {
            search: "a1".into(),
            ..Default::default()
        };
        let ids: Vec<_> = filter_rooms(&rooms, &filter).iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3]);

        let filter = RoomFilter {
            building: Some("C栋".into()),
            status: Some(RoomStatus::Unassigned),
            ..Default::default()
        };
        let ids: Vec<_> = filter_rooms(&rooms, &filter).iter().map(|r| r.id).collect();
        assert_eq!(ids, [11, 14, 15]);

        assert_eq!(filter_rooms(&rooms, &RoomFilter::default()).len(), 15);
    }

    #[test]
    fn test_employee_search_matches_name_or_code() {
        let employees = seed::employees();
        let by_code = EmployeeFilter {
            search: "emp00".into(),
            ..Default::default()
        };
        assert_eq!(filter_employees(&employees, &by_code).len(), 9);

        let by_name = EmployeeFilter {
            search: "十".into(),
            department: Some("市场部".into()),
        };
        let names: Vec<_> = filter_employees(&employees, &by_name)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["郑十一"]);
    }

    #[test]
    fn test_maintenance_search_on_room_label() {
        let rooms = seed::rooms();
        let records = seed::maintenance_records();

        let filter = MaintenanceFilter {
            search: "B202".into(),
            ..Default::default()
        };
        let ids: Vec<_> = filter_maintenance(&records, &rooms, &filter)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, [5, 15]);

        let filter = MaintenanceFilter {
            status: Some(MaintenanceStatus::Pending),
            kind: Some("水电维修".into()),
            ..Default::default()
        };
        let ids: Vec<_> = filter_maintenance(&records, &rooms, &filter)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, [5, 10]);
    }

    #[test]
    fn test_missing_room_label_degrades() {
        let rooms = seed::rooms();
        assert_eq!(room_label(&rooms, 7), "B栋 B102");
        assert_eq!(room_label(&rooms, 404), UNKNOWN_ROOM);
    }

    #[test]
    fn test_search_does_not_match_unknown_label() {
        let mut records = seed::maintenance_records();
        records.truncate(1);
        records[0].room_id = 999;
        let filter = MaintenanceFilter {
            search: "unkn".into(),
            ..Default::default()
        };
        assert!(filter_maintenance(&records, &[], &filter).is_empty());
        // An empty search still lists the orphaned record
        assert_eq!(filter_maintenance(&records, &[], &MaintenanceFilter::default()).len(), 1);
    }

    #[test]
    fn test_distinct_values_keep_first_seen_order() {
        assert_eq!(buildings(&seed::rooms()), ["A栋", "B栋", "C栋"]);
        assert_eq!(
            departments(&seed::employees()),
            ["行政部", "人力资源部", "技术部", "市场部", "财务部"]
        );
        assert_eq!(
            maintenance_kinds(&seed::maintenance_records()),
            ["水电维修", "家具维修", "电器维修", "门窗维修", "其他"]
        );
        assert_eq!(
            maintenance_statuses(&seed::maintenance_records()),
            [
                MaintenanceStatus::Completed,
                MaintenanceStatus::Pending,
                MaintenanceStatus::InProgress
            ]
        );
    }

    #[test]
    fn test_available_employees_and_lookups() {
        let employees = seed::employees();
        let mut rooms = seed::rooms();
        assert!(available_employees(&employees, &rooms).is_empty());

        rooms[1] = rooms[1].vacated();
        let available: Vec<_> = available_employees(&employees, &rooms)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(available, [1]);

        assert_eq!(room_of(&rooms, 3).map(|r| r.id), Some(3));
        assert!(room_of(&rooms, 1).is_none());
        assert_eq!(occupant_of(&employees, &rooms[2]).map(|e| e.name.as_str()), Some("王五"));
        assert!(occupant_of(&employees, &rooms[0]).is_none());
    }
}
