//! Service Layer
//!
//! Everything that touches the world outside the store: the login endpoint,
//! the JSON snapshot mirror and the tokio runtime used for async calls.
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌─────────────┐
//! │ AuthService  │   │  SnapshotDir   │   │   runtime   │
//! │ (HTTP login) │   │ (JSON mirror)  │   │ (block_on)  │
//! └──────────────┘   └────────────────┘   └─────────────┘
//!         │                  ▲
//!         ▼ Session          │ StoreEvent::Changed
//! ┌──────────────────────────────────────────────────────┐
//! │                    RosterStore                       │
//! └──────────────────────────────────────────────────────┘
//! ```

mod auth;
mod runtime;
mod snapshot;

pub use auth::*;
pub use runtime::*;
pub use snapshot::*;
