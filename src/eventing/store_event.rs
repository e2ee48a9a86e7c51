//! StoreEvent - Store Change Notifications
//!
//! Published by `RosterStore` after every mutation attempt.

use chrono::{DateTime, Local};

/// The three roster collections, named by their persistence key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    Rooms,
    MaintenanceRecords,
}

impl Collection {
    /// Key used for the persisted snapshot of this collection
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Employees => "employees",
            Collection::Rooms => "accommodations",
            Collection::MaintenanceRecords => "maintenanceRecords",
        }
    }

    pub fn all() -> &'static [Collection] {
        &[
            Collection::Employees,
            Collection::Rooms,
            Collection::MaintenanceRecords,
        ]
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Success => "OK",
            NotificationKind::Error => "ERROR",
        }
    }
}

/// Transient, already-localized user message
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Events for store -> front-end communication
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A collection snapshot was replaced
    Changed { collection: Collection },

    /// All collections were restored to seed data
    Reset,

    /// User-facing outcome of an operation
    Notify(Notification),
}

impl StoreEvent {
    /// Create a notification event with current timestamp
    pub fn notify(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self::Notify(Notification {
            kind,
            message: message.into(),
            timestamp: Local::now(),
        })
    }

    /// Create a success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::notify(NotificationKind::Success, message)
    }

    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::notify(NotificationKind::Error, message)
    }

    pub fn changed(collection: Collection) -> Self {
        Self::Changed { collection }
    }

    /// Collections affected by this event
    pub fn affected(&self) -> &'static [Collection] {
        match self {
            StoreEvent::Changed { collection } => match collection {
                Collection::Employees => &[Collection::Employees],
                Collection::Rooms => &[Collection::Rooms],
                Collection::MaintenanceRecords => &[Collection::MaintenanceRecords],
            },
            StoreEvent::Reset => Collection::all(),
            StoreEvent::Notify(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys() {
        let keys: Vec<_> = Collection::all().iter().map(|c| c.key()).collect();
        assert_eq!(keys, ["employees", "accommodations", "maintenanceRecords"]);
    }

    #[test]
    fn test_affected_collections() {
        assert_eq!(StoreEvent::Reset.affected().len(), 3);
        assert_eq!(
            StoreEvent::changed(Collection::Rooms).affected(),
            &[Collection::Rooms]
        );
        assert!(StoreEvent::error("boom").affected().is_empty());
    }
}
