//! State - Roster Store and Derived Views
//!
//! `roster` holds the pure transformations, `store` owns the snapshots,
//! `query` and `report` derive read-only views from them.

pub mod query;
pub mod report;
pub mod roster;
pub mod store;

pub use store::{RosterSnapshot, RosterStore};
