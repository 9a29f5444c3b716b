//! Template references and package specs.
//!
//! A template is named by a single user-supplied string. That string is
//! classified exactly once, here, into one of three shapes:
//!
//! | Input                       | Reference                    |
//! |-----------------------------|------------------------------|
//! | `""`                        | [`TemplateReference::Default`] |
//! | `/abs/dir`, `./dir`, `../x` | [`TemplateReference::Path`]    |
//! | anything else               | [`TemplateReference::Package`] |

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::domain::error::DomainError;

// ── TemplateReference ───────────────────────────────────────────────────────

/// Where a template should come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateReference {
    /// The bundled default template shipped with the tool.
    Default,
    /// A directory on disk, relative to the caller's original directory
    /// unless absolute.
    Path(PathBuf),
    /// A registry package, installed on demand.
    Package(PackageSpec),
}

impl TemplateReference {
    /// Classify a raw template string.
    ///
    /// Empty (or whitespace-only) input selects the bundled default.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::Default);
        }
        if is_path_reference(raw) {
            return Ok(Self::Path(PathBuf::from(raw)));
        }
        PackageSpec::parse(raw).map(Self::Package)
    }
}

impl fmt::Display for TemplateReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("(default)"),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Package(spec) => write!(f, "{spec}"),
        }
    }
}

impl FromStr for TemplateReference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A reference is a path iff it is absolute or its first segment is `.` or `..`.
///
/// `.hidden` and `foo/bar` are package references.
pub fn is_path_reference(raw: &str) -> bool {
    let path = Path::new(raw);
    if path.is_absolute() || raw.starts_with('/') {
        return true;
    }
    matches!(
        path.components().next(),
        Some(Component::CurDir | Component::ParentDir)
    )
}

/// Resolve `path` against `base` and fold away `.` and `..` segments
/// without consulting the filesystem.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// Lexical path normalisation: `a/./b/../c` becomes `a/c`.
///
/// `..` never climbs above a root; leading `..` on a relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

// ── PackageSpec ─────────────────────────────────────────────────────────────

/// Shell operators that never appear in an npm or yarn package spec.
///
/// Version ranges may still use `^`, `~`, `<`, `>` and `=`.
const SHELL_OPERATORS: &str = "&|;\"%`";

/// A package reference as understood by npm and yarn.
///
/// `name@range` splits into name and version range; a leading `@` is the
/// scope marker, not a version separator. The full spec is what gets passed
/// to the package manager, the bare name is the directory under
/// `node_modules/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpec {
    raw: String,
    name: String,
    version: Option<String>,
}

impl PackageSpec {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        let invalid = |reason: &str| DomainError::InvalidPackageSpec {
            spec: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("package name cannot be empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(invalid("package spec cannot contain whitespace"));
        }
        if let Some(c) = raw.chars().find(|c| SHELL_OPERATORS.contains(*c)) {
            return Err(invalid(&format!("'{c}' is not allowed in a package spec")));
        }

        let scoped = raw.starts_with('@');
        let version_at = if scoped {
            raw[1..].find('@').map(|i| i + 1)
        } else {
            raw.find('@')
        };

        let (name, version) = match version_at {
            Some(at) => (&raw[..at], Some(&raw[at + 1..])),
            None => (raw, None),
        };

        if name.is_empty() {
            return Err(invalid("package name cannot be empty"));
        }
        if scoped {
            match name.split_once('/') {
                Some((scope, pkg)) if scope.len() > 1 && !pkg.is_empty() => {}
                _ => return Err(invalid("scoped packages look like @scope/name")),
            }
        }
        if version == Some("") {
            return Err(invalid("version after '@' cannot be empty"));
        }

        Ok(Self {
            raw: raw.to_string(),
            name: name.to_string(),
            version: version.map(str::to_string),
        })
    }

    /// Full spec as typed, e.g. `@acme/template@^2`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Bare package name, e.g. `@acme/template`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Directory this package occupies inside `node_modules`.
    pub fn install_dir(&self, node_modules: &Path) -> PathBuf {
        self.name
            .split('/')
            .fold(node_modules.to_path_buf(), |dir, segment| dir.join(segment))
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PackageSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reference_is_default() {
        assert_eq!(TemplateReference::parse("").unwrap(), TemplateReference::Default);
        assert_eq!(TemplateReference::parse("   ").unwrap(), TemplateReference::Default);
    }

    #[test]
    fn dot_prefixed_references_are_paths() {
        for raw in ["./my-template", "../shared/template", ".", ".."] {
            assert!(
                matches!(TemplateReference::parse(raw), Ok(TemplateReference::Path(_))),
                "expected path for {raw}"
            );
        }
    }

    #[test]
    #[cfg(unix)]
    fn absolute_reference_is_path() {
        assert_eq!(
            TemplateReference::parse("/opt/templates/web").unwrap(),
            TemplateReference::Path(PathBuf::from("/opt/templates/web"))
        );
    }

    #[test]
    fn bare_names_are_packages() {
        for raw in ["cra-template", ".hidden", "templates/web", "@acme/template"] {
            assert!(
                matches!(TemplateReference::parse(raw), Ok(TemplateReference::Package(_))),
                "expected package for {raw}"
            );
        }
    }

    #[test]
    fn shell_operators_are_rejected() {
        for raw in ["foo&calc", "a|b", "x;y", "tpl%PATH%", "\"quoted\"", "`id`"] {
            assert!(
                matches!(
                    PackageSpec::parse(raw),
                    Err(DomainError::InvalidPackageSpec { .. })
                ),
                "expected rejection for {raw}"
            );
        }
        assert!(TemplateReference::parse("foo&calc").is_err());
    }

    #[test]
    fn version_ranges_keep_comparison_characters() {
        for raw in ["cra-template@^1.0.0", "cra-template@~1.2", "tpl@>=1.2", "tpl@<2"] {
            assert!(PackageSpec::parse(raw).is_ok(), "expected {raw} to parse");
        }
    }

    #[test]
    fn package_spec_splits_version() {
        let spec = PackageSpec::parse("cra-template@1.0.4").unwrap();
        assert_eq!(spec.name(), "cra-template");
        assert_eq!(spec.version(), Some("1.0.4"));
        assert_eq!(spec.as_str(), "cra-template@1.0.4");
    }

    #[test]
    fn scoped_package_spec_keeps_scope_marker() {
        let spec = PackageSpec::parse("@acme/template").unwrap();
        assert_eq!(spec.name(), "@acme/template");
        assert_eq!(spec.version(), None);

        let spec = PackageSpec::parse("@acme/template@^2").unwrap();
        assert_eq!(spec.name(), "@acme/template");
        assert_eq!(spec.version(), Some("^2"));
    }

    #[test]
    fn malformed_package_specs_are_rejected() {
        assert!(PackageSpec::parse("@acme").is_err());
        assert!(PackageSpec::parse("@/template").is_err());
        assert!(PackageSpec::parse("name@").is_err());
        assert!(PackageSpec::parse("two words").is_err());
        assert!(PackageSpec::parse("").is_err());
    }

    #[test]
    fn scoped_install_dir_nests_under_scope() {
        let spec = PackageSpec::parse("@acme/template@2").unwrap();
        assert_eq!(
            spec.install_dir(Path::new("temp/node_modules")),
            PathBuf::from("temp/node_modules/@acme/template")
        );
    }

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(
            normalize_lexically(Path::new("a/./b/../c")),
            PathBuf::from("a/c")
        );
        assert_eq!(normalize_lexically(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize_lexically(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    #[cfg(unix)]
    fn resolve_against_base() {
        assert_eq!(
            resolve_against(Path::new("/work/app"), Path::new("../templates/web")),
            PathBuf::from("/work/templates/web")
        );
        assert_eq!(
            resolve_against(Path::new("/work/app"), Path::new("/opt/t")),
            PathBuf::from("/opt/t")
        );
        assert_eq!(
            resolve_against(Path::new("/"), Path::new("../../t")),
            PathBuf::from("/t")
        );
    }
}
