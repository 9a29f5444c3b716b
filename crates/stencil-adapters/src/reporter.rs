//! Progress reporter for callers without a terminal.

use stencil_core::application::ports::ProgressReporter;

/// Drops every progress line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _message: &str) {}
}
