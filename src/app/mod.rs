//! Application Layer
//!
//! Command tree, page guard, text views and the dispatcher that ties them
//! to the store.

pub mod application;
pub mod cli;
pub mod navigation;
pub mod views;
