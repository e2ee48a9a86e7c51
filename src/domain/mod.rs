//! Domain - Pure Data Structures
//!
//! Roster entities, login types and configuration. Nothing here performs I/O
//! except `AppConfig` load/save.

pub mod auth;
pub mod config;
pub mod employee;
pub mod maintenance;
pub mod room;
pub mod seed;
