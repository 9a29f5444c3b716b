//! Package manager process adapters.

mod runner;
mod scripted;

pub use runner::ProcessRunner;
pub use scripted::ScriptedRunner;
