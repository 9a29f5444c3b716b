//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: existence checks, reads, temp directory removal
//!   - `CommandRunner`: running the package manager
//!   - `ProgressReporter`: narrating each step to the user
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandRunner, Filesystem, ProgressReporter};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockProgressReporter};
