//! Lodging Admin Library
//!
//! Employee accommodation administration: the staff roster, room
//! assignments and repair tickets, with role-gated pages, localized
//! notifications and local JSON snapshots of every collection.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod helpers;
pub mod i18n;
pub mod logging;
pub mod services;
pub mod state;
