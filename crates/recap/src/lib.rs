//! Public surface for the recap pipeline.
//!
//! This crate re-exports the pipeline building blocks and provides the glue
//! an embedding desktop shell needs: a broadcast event bus and a logging
//! initialization helper.

mod event_bus;

/// Re-export for convenience.
pub use recap_config as config;
pub use recap_core as core;
/// Re-export for convenience.
pub use recap_protocol as protocol;

pub use event_bus::EventBus;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
