//! Capability index: derived view mapping capability tags to providers
//!
//! Rebuilt from the candidate module set whenever it changes. Purely
//! derived, never hand-edited.

use crate::module::{split_requirement, ModuleDescriptor};
use semver::VersionReq;
use std::collections::{BTreeSet, HashMap};

/// Capability tag -> names of modules providing it
///
/// Provider sets are ordered (BTreeSet) so every iteration over candidates
/// is deterministic.
#[derive(Debug, Default)]
pub struct CapabilityIndex {
    providers: HashMap<String, BTreeSet<String>>,
    versions: HashMap<String, semver::Version>,
}

impl CapabilityIndex {
    /// Build the index over a module set
    pub fn build<'a, I>(modules: I) -> Self
    where
        I: IntoIterator<Item = &'a ModuleDescriptor>,
    {
        let mut index = CapabilityIndex::default();
        for module in modules {
            index.versions.insert(module.name.clone(), module.semver());
            for capability in &module.provides {
                index
                    .providers
                    .entry(capability.clone())
                    .or_default()
                    .insert(module.name.clone());
            }
        }
        index
    }

    /// Modules providing `capability`, in name order
    pub fn providers<'a>(&'a self, capability: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.providers
            .get(capability)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Whether a requires entry (`cap` or `cap@range`) is satisfied by this
    /// set. A ranged entry needs at least one provider whose own version
    /// matches the range.
    pub fn satisfies(&self, requirement: &str) -> bool {
        let (capability, range) = split_requirement(requirement);
        let Some(providers) = self.providers.get(capability) else {
            return false;
        };
        match range.and_then(|r| VersionReq::parse(r).ok()) {
            None => !providers.is_empty(),
            Some(req) => providers.iter().any(|name| {
                self.versions
                    .get(name)
                    .is_some_and(|version| req.matches(version))
            }),
        }
    }

    /// Names of providers of `capability` whose version matches `req`
    pub fn providers_matching(&self, capability: &str, req: &VersionReq) -> Vec<&str> {
        self.providers(capability)
            .filter(|name| {
                self.versions
                    .get(*name)
                    .is_some_and(|version| req.matches(version))
            })
            .collect()
    }
}
