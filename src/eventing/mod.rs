//! Eventing - Store Events
//!
//! Events flow from the store to subscribers over crossbeam channels.

pub mod store_event;

pub use store_event::{Collection, Notification, NotificationKind, StoreEvent};
