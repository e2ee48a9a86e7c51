//! Room - Lodging Unit
//!
//! A room holds at most one occupant. Its status is computed from the
//! occupant rather than stored, so it cannot drift out of sync.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::employee::EmployeeId;

/// Internal room id
pub type RoomId = u32;

/// Occupancy status, derived from `Room::occupant_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Unassigned,
    Assigned,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Unassigned => "unassigned",
            RoomStatus::Assigned => "assigned",
        }
    }

    /// Translation key for the status label
    pub fn label_key(&self) -> &'static str {
        match self {
            RoomStatus::Unassigned => "room.status_unassigned",
            RoomStatus::Assigned => "room.status_assigned",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unassigned" => Ok(RoomStatus::Unassigned),
            "assigned" => Ok(RoomStatus::Assigned),
            other => Err(format!("unknown room status '{other}'")),
        }
    }
}

/// A lodging unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RoomRecord", try_from = "RoomRecord")]
pub struct Room {
    pub id: RoomId,
    pub building_name: String,
    pub floor: u8,
    pub room_number: String,
    pub room_type: String,
    pub facilities: String,
    occupant_id: Option<EmployeeId>,
}

impl Room {
    /// Create an empty room
    pub fn new(
        id: RoomId,
        building_name: impl Into<String>,
        floor: u8,
        room_number: impl Into<String>,
        room_type: impl Into<String>,
        facilities: impl Into<String>,
    ) -> Self {
        Self {
            id,
            building_name: building_name.into(),
            floor,
            room_number: room_number.into(),
            room_type: room_type.into(),
            facilities: facilities.into(),
            occupant_id: None,
        }
    }

    /// Builder-style occupant, used for seed data and fixtures
    pub fn with_occupant(mut self, occupant: EmployeeId) -> Self {
        self.occupant_id = Some(occupant);
        self
    }

    pub fn occupant_id(&self) -> Option<EmployeeId> {
        self.occupant_id
    }

    pub fn status(&self) -> RoomStatus {
        if self.occupant_id.is_some() {
            RoomStatus::Assigned
        } else {
            RoomStatus::Unassigned
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.occupant_id.is_some()
    }

    /// Display label `"<building> <roomNumber>"`
    pub fn label(&self) -> String {
        format!("{} {}", self.building_name, self.room_number)
    }

    /// Copy of this room occupied by `employee`
    pub(crate) fn assigned_to(&self, employee: EmployeeId) -> Self {
        self.clone().with_occupant(employee)
    }

    /// Copy of this room with no occupant
    pub(crate) fn vacated(&self) -> Self {
        Self {
            occupant_id: None,
            ..self.clone()
        }
    }
}

/// Persisted shape of a room, including the redundant status field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomRecord {
    id: RoomId,
    building_name: String,
    #[serde(default)]
    floor: u8,
    room_number: String,
    #[serde(rename = "type")]
    room_type: String,
    #[serde(default)]
    facilities: String,
    occupant_id: Option<EmployeeId>,
    status: RoomStatus,
}

impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        let status = room.status();
        Self {
            id: room.id,
            building_name: room.building_name,
            floor: room.floor,
            room_number: room.room_number,
            room_type: room.room_type,
            facilities: room.facilities,
            occupant_id: room.occupant_id,
            status,
        }
    }
}

impl TryFrom<RoomRecord> for Room {
    type Error = String;

    fn try_from(record: RoomRecord) -> Result<Self, Self::Error> {
        let derived = if record.occupant_id.is_some() {
            RoomStatus::Assigned
        } else {
            RoomStatus::Unassigned
        };
        if derived != record.status {
            return Err(format!(
                "room {} has status '{}' but occupantId {:?}",
                record.id, record.status, record.occupant_id
            ));
        }
        Ok(Self {
            id: record.id,
            building_name: record.building_name,
            floor: record.floor,
            room_number: record.room_number,
            room_type: record.room_type,
            facilities: record.facilities,
            occupant_id: record.occupant_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room::new(1, "A栋", 1, "A101", "单人间", "独立卫浴、空调、书桌")
    }

    #[test]
    fn test_status_follows_occupant() {
        let empty = room();
        assert_eq!(empty.status(), RoomStatus::Unassigned);

        let taken = empty.assigned_to(7);
        assert_eq!(taken.status(), RoomStatus::Assigned);
        assert_eq!(taken.occupant_id(), Some(7));

        let vacated = taken.vacated();
        assert_eq!(vacated, empty);
    }

    #[test]
    fn test_serialized_room_carries_status() {
        let json = serde_json::to_value(room().with_occupant(3)).expect("serialize");
        assert_eq!(json["status"], "assigned");
        assert_eq!(json["occupantId"], 3);
        assert_eq!(json["type"], "单人间");
        assert_eq!(json["buildingName"], "A栋");
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_status() {
        let json = r#"{"id":1,"buildingName":"A栋","floor":1,"roomNumber":"A101",
            "type":"单人间","facilities":"","occupantId":null,"status":"assigned"}"#;
        assert!(serde_json::from_str::<Room>(json).is_err());

        let json = r#"{"id":1,"buildingName":"A栋","roomNumber":"A101",
            "type":"单人间","occupantId":4,"status":"assigned"}"#;
        let parsed: Room = serde_json::from_str(json).expect("deserialize");
        assert_eq!(parsed.occupant_id(), Some(4));
        assert_eq!(parsed.floor, 0);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("assigned".parse::<RoomStatus>(), Ok(RoomStatus::Assigned));
        assert!("occupied".parse::<RoomStatus>().is_err());
    }
}
