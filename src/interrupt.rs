//! Ctrl-C handling while a child program runs in the foreground.
//!
//! The terminal delivers SIGINT to the whole foreground process group, so the
//! child sees it on its own. `no` only records that it happened and keeps
//! waiting, then refuses to start any further step.
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context as _, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the process-wide Ctrl-C handler.
///
/// # Errors
///
/// Returns an error if a handler is already installed.
pub fn install() -> Result<()> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
        .context("failed to install Ctrl-C handler")
}

/// Return whether Ctrl-C was pressed since the last call, clearing the flag.
pub fn take() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

