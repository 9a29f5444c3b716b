//! Application services - orchestrate use cases.

pub mod template_resolver;

pub use template_resolver::{
    DEFAULT_TEMPLATE_DIR, InstallOptions, TEMP_INSTALL_DIR, TemplateResolver, default_template_dir,
    temp_install_dir,
};
