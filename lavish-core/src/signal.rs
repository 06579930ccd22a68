//! Signal-driven shutdown.
//!
//! On SIGINT or SIGTERM the interception layer is deactivated and the
//! process exits. In-flight operations are not waited for — a backoff
//! sleep can hold the calling thread for seconds, and nobody wants to
//! wait that long to stop adding numbers.

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::info;

use crate::context::context;

/// Spawn a background thread that deactivates interception and exits
/// on SIGINT or SIGTERM.
///
/// # Errors
/// Returns an I/O error if the signal handler cannot be registered.
pub fn install_signal_handlers() -> std::io::Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    std::thread::Builder::new()
        .name("lavish-signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!(signal, "shutdown signal received, deactivating interception");
                context().deactivate();
                std::process::exit(0);
            }
        })?;
    Ok(())
}
