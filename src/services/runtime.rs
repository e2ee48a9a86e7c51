//! Tokio Runtime Bridge
//!
//! The store and the command front-end are synchronous. The only async
//! boundary is the HTTP login call, which runs on a lazily created runtime.
//!
//! ```text
//! command handler (sync)
//!       │
//!       ▼
//! block_on(auth.login(..))
//!       │
//!       ▼
//! tokio::Runtime (multi-thread, created once)
//! ```

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::{Error, Result};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }

    let runtime = Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("lodging-io")
        .enable_all()
        .build()?;
    debug!("Tokio runtime started");

    // A concurrent initializer may have won; its runtime is used and ours dropped
    let _ = TOKIO_RUNTIME.set(runtime);
    TOKIO_RUNTIME.get().ok_or_else(|| Error::Invalid {
        message: "Tokio runtime unavailable".to_string(),
    })
}

/// Block the current thread on a future.
///
/// Must not be called from inside the runtime itself.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    Ok(get_runtime()?.block_on(future))
}
