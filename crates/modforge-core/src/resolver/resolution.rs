//! Resolver result types
//!
//! A [`Resolution`] is the resolver's complete answer for one requested
//! module set. It is created once per resolve call (or handed back from
//! the cache) and never mutated afterwards.

use crate::module::ModuleDescriptor;
use serde::Serialize;
use std::fmt;

/// Options controlling one resolve call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Pull in the best provider for unsatisfied capabilities instead of
    /// reporting them as missing
    pub auto_resolve: bool,

    /// Produce an ordered module list even when conflicts were found
    pub allow_conflicts: bool,
}

impl ResolveOptions {
    /// Canonical cache-key serialization of the requested set + options
    pub fn fingerprint(&self, requested: &[String]) -> String {
        let mut names: Vec<&str> = requested.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        format!(
            "{}|auto={}|allow={}",
            names.join(","),
            self.auto_resolve,
            self.allow_conflicts
        )
    }
}

/// Class of conflict between selected modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    /// A module lists another present module (or one of its capabilities)
    /// as incompatible
    Direct,
    /// More than one module of a single-instance type
    Exclusive,
    /// A requires/provides cycle
    Circular,
    /// Requirers of one capability declare version ranges no single
    /// provider satisfies
    Version,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConflictKind::Direct => "direct",
            ConflictKind::Exclusive => "exclusive",
            ConflictKind::Circular => "circular",
            ConflictKind::Version => "version",
        };
        write!(f, "{}", label)
    }
}

/// One detected conflict. `modules` is sorted for every kind except
/// `Circular`, where it carries the cycle path in traversal order.
#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub modules: Vec<String>,
    pub message: String,
}

/// A recoverable problem found while resolving. Surfaced as data so
/// interactive callers can render it without crashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ResolveIssue {
    /// Requested name unknown to the registry
    ModuleNotFound { name: String },
    /// Capability unsatisfiable even after auto-resolution
    MissingDependency {
        capability: String,
        required_by: String,
    },
}

impl fmt::Display for ResolveIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveIssue::ModuleNotFound { name } => {
                write!(f, "module '{}' not found in registry", name)
            }
            ResolveIssue::MissingDependency {
                capability,
                required_by,
            } => write!(
                f,
                "no module provides '{}' (required by '{}')",
                capability, required_by
            ),
        }
    }
}

/// A ranked alternative proposed by the suggestion engine
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub module: String,
    pub reason: String,
    pub score: i64,
}

/// The resolver's complete answer for a requested module set
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub success: bool,

    /// Selected modules. Topologically ordered (dependencies first) unless
    /// conflicts blocked the ordering pass.
    pub modules: Vec<ModuleDescriptor>,

    pub conflicts: Vec<Conflict>,
    pub errors: Vec<ResolveIssue>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Resolution {
    /// Names of the selected modules, in resolution order
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn conflicts_of_kind(&self, kind: ConflictKind) -> Vec<&Conflict> {
        self.conflicts.iter().filter(|c| c.kind == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_order_insensitive() {
        let options = ResolveOptions {
            auto_resolve: true,
            allow_conflicts: false,
        };
        let a = options.fingerprint(&["vuetify".to_string(), "vue-base".to_string()]);
        let b = options.fingerprint(&["vue-base".to_string(), "vuetify".to_string()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_varies_with_options() {
        let requested = vec!["vue-base".to_string()];
        let a = ResolveOptions {
            auto_resolve: true,
            allow_conflicts: false,
        }
        .fingerprint(&requested);
        let b = ResolveOptions {
            auto_resolve: false,
            allow_conflicts: false,
        }
        .fingerprint(&requested);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_dedups_names() {
        let options = ResolveOptions::default();
        let a = options.fingerprint(&["vue-base".to_string(), "vue-base".to_string()]);
        let b = options.fingerprint(&["vue-base".to_string()]);
        assert_eq!(a, b);
    }
}
