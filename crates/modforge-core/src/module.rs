//! Module descriptor types and parsing
//!
//! A module is the unit everything else operates on: a named, versioned
//! bundle of capabilities and file contributions. Descriptors are loaded
//! once by the registry and treated as immutable afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of functionality a module contributes to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleType {
    FrontendFramework,
    UiLibrary,
    BackendService,
    AuthProvider,
    Deployment,
    Tooling,
}

impl ModuleType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleType::FrontendFramework => "frontend framework",
            ModuleType::UiLibrary => "UI library",
            ModuleType::BackendService => "backend service",
            ModuleType::AuthProvider => "auth provider",
            ModuleType::Deployment => "deployment target",
            ModuleType::Tooling => "tooling",
        }
    }

    /// Whether only one module of this type may appear in a project.
    /// A project has one frontend framework and one deployment target;
    /// everything else can stack.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, ModuleType::FrontendFramework | ModuleType::Deployment)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a file contribution combines with contributions from other modules
/// targeting the same path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Last contribution wins; multiple contributors produce a warning
    Replace,
    /// Parse contributions as JSON and deep-merge them in order
    MergeJson,
    /// Concatenate contributions in order
    Append,
    /// Concatenate contributions in reverse order
    Prepend,
    /// Concatenate line-by-line, dropping exact-duplicate lines
    AppendUnique,
    /// Delegate to a named merge function supplied by the generate context
    Custom(String),
}

impl MergeStrategy {
    /// Precedence when contributors to one path disagree on strategy.
    /// Higher wins; the more information-preserving strategy is preferred.
    pub fn precedence(&self) -> u8 {
        match self {
            MergeStrategy::Replace => 0,
            MergeStrategy::Append | MergeStrategy::Prepend => 1,
            MergeStrategy::AppendUnique => 2,
            MergeStrategy::MergeJson => 3,
            MergeStrategy::Custom(_) => 4,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            MergeStrategy::Replace => "replace".to_string(),
            MergeStrategy::MergeJson => "merge-json".to_string(),
            MergeStrategy::Append => "append".to_string(),
            MergeStrategy::Prepend => "prepend".to_string(),
            MergeStrategy::AppendUnique => "append-unique".to_string(),
            MergeStrategy::Custom(name) => format!("custom:{}", name),
        }
    }
}

/// File body carried by a template entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateBody {
    /// Raw content used as-is
    Static(String),
    /// Content with `{{variable}}` placeholders substituted at generate time
    Templated(String),
}

impl TemplateBody {
    pub fn raw(&self) -> &str {
        match self {
            TemplateBody::Static(s) | TemplateBody::Templated(s) => s,
        }
    }
}

/// One file contribution from a module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTemplate {
    /// Output path relative to the target directory
    pub path: String,

    /// File content, static or templated
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub body: TemplateBody,

    /// How this contribution merges with others targeting the same path
    #[serde(default = "default_strategy")]
    pub strategy: MergeStrategy,
}

fn default_strategy() -> MergeStrategy {
    MergeStrategy::Replace
}

/// A self-contained unit of project functionality with declared
/// capabilities and file contributions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Unique name (registry key)
    pub name: String,

    /// Semantic version of the module itself
    pub version: String,

    #[serde(rename = "type")]
    pub module_type: ModuleType,

    /// Free-form grouping tag (e.g. "frontend", "infrastructure")
    #[serde(default)]
    pub category: String,

    /// Higher priority resolves and applies first
    #[serde(default)]
    pub priority: i32,

    /// Capability tags this module provides
    #[serde(default)]
    pub provides: Vec<String>,

    /// Capability tags this module needs satisfied. An entry may carry a
    /// semver range after `@`, e.g. `frontend@^3.0`
    #[serde(default)]
    pub requires: Vec<String>,

    /// Module names or capability tags this module is known to work with
    #[serde(default)]
    pub compatible_with: Vec<String>,

    /// Module names or capability tags this module cannot coexist with
    #[serde(default)]
    pub incompatible_with: Vec<String>,

    /// Ordered file contributions
    #[serde(default)]
    pub file_templates: Vec<FileTemplate>,
}

impl ModuleDescriptor {
    /// Validate descriptor invariants. Called by registries at load time;
    /// a failure here is a malformed-registry programmer error.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.is_empty() {
            anyhow::bail!("module descriptor has an empty name");
        }
        semver::Version::parse(&self.version).map_err(|e| {
            anyhow::anyhow!("module '{}' has invalid version '{}': {}", self.name, self.version, e)
        })?;
        // A module cannot require its own capability
        for req in &self.requires {
            let (cap, _) = split_requirement(req);
            if self.provides.iter().any(|p| p == cap) {
                anyhow::bail!(
                    "module '{}' both provides and requires capability '{}'",
                    self.name,
                    cap
                );
            }
        }
        Ok(())
    }

    /// Parsed semver version. Descriptors are validated at load time, so a
    /// parse failure maps to 0.0.0 rather than propagating.
    pub fn semver(&self) -> semver::Version {
        semver::Version::parse(&self.version)
            .unwrap_or_else(|_| semver::Version::new(0, 0, 0))
    }

    /// Whether `other` (a module name or one of its capabilities) appears
    /// in this module's incompatibility list
    pub fn is_incompatible_with(&self, other: &ModuleDescriptor) -> bool {
        self.incompatible_with
            .iter()
            .any(|entry| entry == &other.name || other.provides.iter().any(|p| p == entry))
    }
}

/// Split a requires entry into capability tag and optional version range
pub fn split_requirement(entry: &str) -> (&str, Option<&str>) {
    match entry.split_once('@') {
        Some((cap, range)) => (cap, Some(range)),
        None => (entry, None),
    }
}
