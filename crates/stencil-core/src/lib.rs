//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for resolving,
//! installing and applying project templates.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (TemplateResolver)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CommandRunner, Progress)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, ProcessRunner, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (TemplateReference, AppPackage, merge)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use stencil_core::{
//!     application::{InstallOptions, TemplateResolver},
//!     domain::{AppPackage, configure_app_package},
//! };
//!
//! // 1. Build the resolver with injected adapters
//! let resolver = TemplateResolver::new(filesystem, runner, reporter, InstallOptions::default());
//!
//! // 2. Resolve, read, merge, clean up
//! let own = Path::new("/opt/stencil");
//! let cwd = Path::new("/work/my-app");
//! let path = resolver.template_path("cra-template", "my-app", own, cwd)?;
//! let config = resolver.template_config(path.as_deref(), own)?;
//! let mut app = AppPackage::from_json(&std::fs::read_to_string("package.json")?)?;
//! if let Some(config) = &config {
//!     configure_app_package(&mut app, config);
//! }
//! resolver.cleanup(cwd)?;
//! # Ok::<(), stencil_core::error::StencilError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InstallOptions, TemplateResolver,
        ports::{CommandRunner, Filesystem, ProgressReporter},
    };
    pub use crate::domain::{
        AppPackage, CommandLine, CommandOutcome, InstallStrategy, PackageManager, PackageSpec,
        Stdio, TemplateConfig, TemplateReference, configure_app_package,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
