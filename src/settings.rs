//! Internal settings for rbush.
//!
//! This module initializes the logging configuration at startup. The logging behavior is
//! controlled by the `RBUSH_DEBUG` environment variable. If `RBUSH_DEBUG` is not set or is
//! set to a falsy value ("0", "false", or empty), logging stays disabled. Otherwise, logging
//! is enabled with a maximum level of DEBUG.

use ctor::ctor;
use tracing::Level;

#[ctor]
fn set_debug_level() {
    if std::env::var("RBUSH_DEBUG").map_or(true, |v| v == "0" || v == "false" || v.is_empty()) {
        // logging macros will not output
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
