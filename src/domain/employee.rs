//! Employee - Staff Roster Entry

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Internal employee id, unique within the roster
pub type EmployeeId = u32;

/// A staff member who may be assigned lodging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub position: String,
    /// Human-facing staff code such as `EMP001`. Not checked for uniqueness.
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
}

/// Payload for adding or editing an employee.
///
/// Editing replaces every field of the stored record except `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFields {
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
}

impl EmployeeFields {
    /// Payload with the four core fields set
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
        employee_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            position: position.into(),
            employee_id: employee_id.into(),
            ..Default::default()
        }
    }
}

impl Employee {
    /// Build a stored record from a payload and an assigned id
    pub fn from_fields(id: EmployeeId, fields: EmployeeFields) -> Self {
        Self {
            id,
            name: fields.name,
            department: fields.department,
            position: fields.position,
            employee_id: fields.employee_id,
            gender: fields.gender,
            age: fields.age,
            phone: fields.phone,
            entry_date: fields.entry_date,
        }
    }

    /// Editable fields of this record, e.g. to prefill an edit
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            department: self.department.clone(),
            position: self.position.clone(),
            employee_id: self.employee_id.clone(),
            gender: self.gender.clone(),
            age: self.age,
            phone: self.phone.clone(),
            entry_date: self.entry_date,
        }
    }
}
