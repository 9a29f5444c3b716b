//! Template config and app manifest (`package.json`) models, and the merge
//! between them.
//!
//! Both documents are deliberately loose: the four recognised fields are
//! typed as JSON objects, everything else is carried through untouched in
//! `extra` so that writing a manifest back never loses keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// File name a template uses to declare what it adds to the app manifest.
pub const TEMPLATE_CONFIG_FILE: &str = ".template.dependencies.json";

/// A JSON object.
pub type JsonMap = Map<String, Value>;

// ── TemplateConfig ──────────────────────────────────────────────────────────

/// Contents of [`TEMPLATE_CONFIG_FILE`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<JsonMap>,

    #[serde(
        default,
        rename = "devDependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub dev_dependencies: Option<JsonMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<JsonMap>,

    #[serde(default, rename = "lint-staged", skip_serializing_if = "Option::is_none")]
    pub lint_staged: Option<JsonMap>,

    /// Keys the merge does not look at.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl TemplateConfig {
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    /// `true` if none of the four merged fields carry any entry.
    pub fn is_empty(&self) -> bool {
        [
            self.dependencies.as_ref(),
            self.dev_dependencies.as_ref(),
            self.scripts.as_ref(),
            self.lint_staged.as_ref(),
        ]
        .into_iter()
        .all(|field| field.is_none_or(|map| map.is_empty()))
    }
}

// ── AppPackage ──────────────────────────────────────────────────────────────

/// The generated project's `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<JsonMap>,

    #[serde(
        default,
        rename = "devDependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub dev_dependencies: Option<JsonMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<JsonMap>,

    #[serde(default, rename = "lint-staged", skip_serializing_if = "Option::is_none")]
    pub lint_staged: Option<JsonMap>,

    #[serde(flatten)]
    pub extra: JsonMap,
}

impl AppPackage {
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    /// Pretty-printed JSON with a trailing newline, the way npm writes it.
    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        let mut out = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }

    /// Overlay `config` onto this manifest.
    ///
    /// Each recognised field becomes `app ∪ template`, template entries
    /// winning on key collision. Afterwards all four fields are present,
    /// possibly empty.
    pub fn apply_template(&mut self, config: &TemplateConfig) -> &mut Self {
        self.dependencies = Some(overlay(
            self.dependencies.take(),
            config.dependencies.as_ref(),
        ));
        self.dev_dependencies = Some(overlay(
            self.dev_dependencies.take(),
            config.dev_dependencies.as_ref(),
        ));
        self.scripts = Some(overlay(self.scripts.take(), config.scripts.as_ref()));
        self.lint_staged = Some(overlay(
            self.lint_staged.take(),
            config.lint_staged.as_ref(),
        ));
        self
    }
}

/// Merge a template config into an app manifest in place and hand the
/// manifest back for chaining.
pub fn configure_app_package<'a>(
    app: &'a mut AppPackage,
    config: &TemplateConfig,
) -> &'a mut AppPackage {
    app.apply_template(config)
}

fn overlay(base: Option<JsonMap>, top: Option<&JsonMap>) -> JsonMap {
    let mut merged = base.unwrap_or_default();
    if let Some(top) = top {
        for (key, value) in top {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
