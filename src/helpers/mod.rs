//! Helper Utilities
//!
//! Platform directories, file writes and secret sealing.

mod fs;
mod string;

pub use fs::*;
pub use string::*;
