//! Maintenance - Facility Repair Tickets
//!
//! Status moves along a fixed chain: pending -> in_progress -> completed.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::room::RoomId;

/// Internal maintenance record id
pub type RecordId = u32;

/// Status of a maintenance ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    /// All statuses in chain order
    pub fn all() -> &'static [MaintenanceStatus] {
        &[
            MaintenanceStatus::Pending,
            MaintenanceStatus::InProgress,
            MaintenanceStatus::Completed,
        ]
    }

    /// The only status this one may advance to
    pub fn next(self) -> Option<Self> {
        match self {
            MaintenanceStatus::Pending => Some(MaintenanceStatus::InProgress),
            MaintenanceStatus::InProgress => Some(MaintenanceStatus::Completed),
            MaintenanceStatus::Completed => None,
        }
    }

    pub fn can_advance_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
        }
    }

    /// Translation key for the status label
    pub fn label_key(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "maintenance.status_pending",
            MaintenanceStatus::InProgress => "maintenance.status_in_progress",
            MaintenanceStatus::Completed => "maintenance.status_completed",
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintenanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MaintenanceStatus::Pending),
            "in_progress" | "in-progress" => Ok(MaintenanceStatus::InProgress),
            "completed" => Ok(MaintenanceStatus::Completed),
            other => Err(format!("unknown maintenance status '{other}'")),
        }
    }
}

/// A reported facility issue tied to a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: RecordId,
    /// Room the issue was reported for. May dangle after room removal.
    pub room_id: RoomId,
    /// Free-text category, e.g. plumbing or furniture
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub report_date: NaiveDate,
    pub status: MaintenanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
}

/// Payload for adding or editing a maintenance record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceFields {
    pub room_id: Option<RoomId>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to today on add, keeps the stored date on edit
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
}

impl MaintenanceFields {
    pub fn new(room_id: RoomId, kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            room_id: Some(room_id),
            kind: kind.into(),
            description: description.into(),
            report_date: None,
        }
    }

    pub fn reported_on(mut self, date: NaiveDate) -> Self {
        self.report_date = Some(date);
        self
    }
}

impl MaintenanceRecord {
    /// Editable fields of this record
    pub fn fields(&self) -> MaintenanceFields {
        MaintenanceFields {
            room_id: Some(self.room_id),
            kind: self.kind.clone(),
            description: self.description.clone(),
            report_date: Some(self.report_date),
        }
    }

    /// Copy of this record moved to `status`, stamping completion when reached
    pub(crate) fn advanced_to(&self, status: MaintenanceStatus, today: NaiveDate) -> Self {
        let completion_date = match status {
            MaintenanceStatus::Completed => Some(today),
            _ => self.completion_date,
        };
        Self {
            status,
            completion_date,
            ..self.clone()
        }
    }

    /// `YYYY-MM` bucket of the report date
    pub fn report_month(&self) -> String {
        self.report_date.format("%Y-%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_chain() {
        use MaintenanceStatus::*;
        assert_eq!(Pending.next(), Some(InProgress));
        assert_eq!(InProgress.next(), Some(Completed));
        assert_eq!(Completed.next(), None);

        assert!(Pending.can_advance_to(InProgress));
        assert!(!Pending.can_advance_to(Completed));
        assert!(!Completed.can_advance_to(Pending));
        assert!(!InProgress.can_advance_to(InProgress));
        assert!(Completed.is_terminal());
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in MaintenanceStatus::all() {
            assert_eq!(status.as_str().parse::<MaintenanceStatus>(), Ok(*status));
        }
        assert_eq!(
            "in-progress".parse::<MaintenanceStatus>(),
            Ok(MaintenanceStatus::InProgress)
        );
        assert!("done".parse::<MaintenanceStatus>().is_err());
    }

    #[test]
    fn test_record_json_shape() {
        let record = MaintenanceRecord {
            id: 1,
            room_id: 2,
            kind: "水电维修".into(),
            description: "洗手间水龙头漏水".into(),
            report_date: NaiveDate::from_ymd_opt(2023, 6, 15).expect("date"),
            status: MaintenanceStatus::InProgress,
            completion_date: None,
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["roomId"], 2);
        assert_eq!(json["type"], "水电维修");
        assert_eq!(json["reportDate"], "2023-06-15");
        assert_eq!(json["status"], "in_progress");
        assert_eq!(record.report_month(), "2023-06");
    }

    #[test]
    fn test_advanced_to_completed_stamps_date() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).expect("date");
        let record = MaintenanceRecord {
            id: 3,
            room_id: 3,
            kind: String::new(),
            description: "leak".into(),
            report_date: today,
            status: MaintenanceStatus::InProgress,
            completion_date: None,
        };
        let done = record.advanced_to(MaintenanceStatus::Completed, today);
        assert_eq!(done.completion_date, Some(today));
        assert_eq!(done.description, "leak");
    }
}
