//! Dependency resolver: expands a requested module set into a complete,
//! conflict-checked, deterministically ordered selection
//!
//! Resolution problems are always returned as data on the [`Resolution`],
//! never as errors. Only a malformed registry is a programmer error, and
//! registries validate descriptors at load time.

use crate::module::{split_requirement, ModuleDescriptor};
use crate::registry::ModuleRegistry;
use crate::resolver::cache::ResolutionCache;
use crate::resolver::capability::CapabilityIndex;
use crate::resolver::resolution::{
    Conflict, ConflictKind, Resolution, ResolveIssue, ResolveOptions, Suggestion,
};
use crate::resolver::suggest;
use semver::VersionReq;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Resolver over an immutable registry snapshot
///
/// Pure aside from cache population; safe to call repeatedly from
/// interactive callers that re-resolve on every selection change.
pub struct Resolver<'a, R: ModuleRegistry + ?Sized> {
    registry: &'a R,
    cache: ResolutionCache,
}

impl<'a, R: ModuleRegistry + ?Sized> Resolver<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self::with_cache(registry, ResolutionCache::default())
    }

    /// Inject a cache (e.g. [`ResolutionCache::disabled`] in tests)
    pub fn with_cache(registry: &'a R, cache: ResolutionCache) -> Self {
        Self { registry, cache }
    }

    /// Resolve a requested module set. Memoized on (sorted names, options).
    pub fn resolve(&self, requested: &[String], options: ResolveOptions) -> Arc<Resolution> {
        let fingerprint = options.fingerprint(requested);
        if let Some(hit) = self.cache.get(&fingerprint) {
            return hit;
        }
        let resolution = Arc::new(self.resolve_uncached(requested, options));
        self.cache.insert(fingerprint, Arc::clone(&resolution));
        resolution
    }

    fn resolve_uncached(&self, requested: &[String], options: ResolveOptions) -> Resolution {
        let mut working: Vec<ModuleDescriptor> = Vec::new();
        let mut errors: Vec<ResolveIssue> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        let mut suggestions: Vec<Suggestion> = Vec::new();

        // Seed: unknown names become data, not failures of the whole call
        for name in requested {
            if working.iter().any(|m| &m.name == name) {
                continue;
            }
            match self.registry.get_module(name) {
                Some(module) => working.push(module.clone()),
                None => {
                    suggestions.extend(suggest::suggest_for_name(self.registry, name, &working));
                    errors.push(ResolveIssue::ModuleNotFound { name: name.clone() });
                }
            }
        }

        if options.auto_resolve {
            self.expand(&mut working, &mut warnings);
        }

        // Verification: whatever is still unsatisfied is a missing dependency.
        // Each capability is suggested for once, no matter how many modules
        // require it.
        let index = CapabilityIndex::build(&working);
        let mut suggested: HashSet<&str> = HashSet::new();
        for module in &working {
            for requirement in &module.requires {
                if index.satisfies(requirement) {
                    continue;
                }
                if suggested.insert(requirement.as_str()) {
                    suggestions.extend(suggest::suggest_for_capability(
                        self.registry,
                        requirement,
                        &working,
                    ));
                }
                let issue = ResolveIssue::MissingDependency {
                    capability: requirement.clone(),
                    required_by: module.name.clone(),
                };
                if !errors.contains(&issue) {
                    errors.push(issue);
                }
            }
        }

        let conflicts = detect_conflicts(&working);
        let blocked = !conflicts.is_empty() && !options.allow_conflicts;

        let modules = if blocked {
            // No ordering pass when conflicts block the resolution
            working
        } else {
            topological_order(working)
        };

        Resolution {
            success: errors.is_empty() && (conflicts.is_empty() || options.allow_conflicts),
            modules,
            conflicts,
            errors,
            warnings,
            suggestions,
        }
    }

    /// Fixed-point expansion: each round adds at most one module, so the
    /// loop terminates once the registry is exhausted
    fn expand(&self, working: &mut Vec<ModuleDescriptor>, warnings: &mut Vec<String>) {
        loop {
            let index = CapabilityIndex::build(working.iter());
            let mut addition: Option<(ModuleDescriptor, String, String)> = None;

            'search: for module in working.iter() {
                for requirement in &module.requires {
                    if index.satisfies(requirement) {
                        continue;
                    }
                    if let Some(candidate) = self.pick_provider(requirement, working) {
                        addition = Some((
                            candidate,
                            requirement.clone(),
                            module.name.clone(),
                        ));
                        break 'search;
                    }
                }
            }

            match addition {
                Some((candidate, requirement, required_by)) => {
                    warnings.push(format!(
                        "auto-resolved '{}' to satisfy '{}' (required by '{}')",
                        candidate.name, requirement, required_by
                    ));
                    working.push(candidate);
                }
                None => return,
            }
        }
    }

    /// Highest-priority compatible provider for a requirement, lexical
    /// name as the tie-break
    fn pick_provider(
        &self,
        requirement: &str,
        working: &[ModuleDescriptor],
    ) -> Option<ModuleDescriptor> {
        let (capability, range) = split_requirement(requirement);
        let req = range.and_then(|r| VersionReq::parse(r).ok());

        let mut candidates: Vec<&ModuleDescriptor> = self
            .registry
            .all_modules()
            .iter()
            .filter(|m| m.provides.iter().any(|p| p == capability))
            .filter(|m| !working.iter().any(|w| w.name == m.name))
            .filter(|m| match &req {
                Some(req) => req.matches(&m.semver()),
                None => true,
            })
            .filter(|m| is_compatible(m, working))
            .collect();

        candidates.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.name.cmp(&b.name)));
        candidates.first().map(|m| (*m).clone())
    }
}

/// Whether adding `candidate` would immediately conflict with the set
fn is_compatible(candidate: &ModuleDescriptor, working: &[ModuleDescriptor]) -> bool {
    working.iter().all(|member| {
        !candidate.is_incompatible_with(member)
            && !member.is_incompatible_with(candidate)
            && !(candidate.module_type.is_exclusive()
                && member.module_type == candidate.module_type)
    })
}

/// Run all four conflict checks over the final working set
fn detect_conflicts(working: &[ModuleDescriptor]) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = Vec::new();
    let mut seen: HashSet<(ConflictKind, Vec<String>)> = HashSet::new();

    let mut push = |conflicts: &mut Vec<Conflict>, conflict: Conflict| {
        let mut key = conflict.modules.clone();
        key.sort_unstable();
        if seen.insert((conflict.kind, key)) {
            conflicts.push(conflict);
        }
    };

    // Direct: one conflict per unordered incompatible pair
    for (i, a) in working.iter().enumerate() {
        for b in &working[i + 1..] {
            if a.is_incompatible_with(b) || b.is_incompatible_with(a) {
                let mut pair = vec![a.name.clone(), b.name.clone()];
                pair.sort_unstable();
                let message = format!("'{}' is incompatible with '{}'", pair[0], pair[1]);
                push(
                    &mut conflicts,
                    Conflict {
                        kind: ConflictKind::Direct,
                        modules: pair,
                        message,
                    },
                );
            }
        }
    }

    // Exclusive: single-instance module types
    let mut by_type: HashMap<_, Vec<&str>> = HashMap::new();
    for module in working {
        if module.module_type.is_exclusive() {
            by_type
                .entry(module.module_type)
                .or_default()
                .push(module.name.as_str());
        }
    }
    let mut exclusive_types: Vec<_> = by_type.into_iter().filter(|(_, v)| v.len() > 1).collect();
    exclusive_types.sort_by_key(|(t, _)| t.display_name());
    for (module_type, names) in exclusive_types {
        let mut names: Vec<String> = names.into_iter().map(String::from).collect();
        names.sort_unstable();
        let message = format!(
            "only one {} is allowed, found: {}",
            module_type,
            names.join(", ")
        );
        push(
            &mut conflicts,
            Conflict {
                kind: ConflictKind::Exclusive,
                modules: names,
                message,
            },
        );
    }

    for cycle in find_cycles(working) {
        let message = format!("circular dependency: {}", cycle.join(" -> "));
        push(
            &mut conflicts,
            Conflict {
                kind: ConflictKind::Circular,
                modules: cycle,
                message,
            },
        );
    }

    for conflict in version_conflicts(working) {
        push(&mut conflicts, conflict);
    }

    conflicts
}

/// Requires->provides adjacency over the working set
fn dependency_edges(working: &[ModuleDescriptor]) -> HashMap<&str, Vec<&str>> {
    let index = CapabilityIndex::build(working.iter());
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for module in working {
        let entry = edges.entry(module.name.as_str()).or_default();
        for requirement in &module.requires {
            let (capability, _) = split_requirement(requirement);
            // Re-borrow provider names from `working` so the edge map does
            // not borrow the transient index
            for provider in working.iter().filter(|p| {
                p.name != module.name && index.providers(capability).any(|n| n == p.name)
            }) {
                let name = provider.name.as_str();
                if !entry.contains(&name) {
                    entry.push(name);
                }
            }
        }
        entry.sort_unstable();
    }
    edges
}

/// Three-color DFS cycle detection; each cycle carries its full path
fn find_cycles(working: &[ModuleDescriptor]) -> Vec<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let edges = dependency_edges(working);
    let mut names: Vec<&str> = working.iter().map(|m| m.name.as_str()).collect();
    names.sort_unstable();

    let mut color: HashMap<&str, Color> = names.iter().map(|&n| (n, Color::White)).collect();
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut seen_cycles: HashSet<Vec<String>> = HashSet::new();

    fn visit<'w>(
        node: &'w str,
        edges: &HashMap<&'w str, Vec<&'w str>>,
        color: &mut HashMap<&'w str, Color>,
        stack: &mut Vec<&'w str>,
        cycles: &mut Vec<Vec<String>>,
        seen_cycles: &mut HashSet<Vec<String>>,
    ) {
        color.insert(node, Color::Gray);
        stack.push(node);
        for &next in edges.get(node).into_iter().flatten() {
            match color.get(next).copied().unwrap_or(Color::White) {
                Color::White => visit(next, edges, color, stack, cycles, seen_cycles),
                Color::Gray => {
                    // Back edge: the cycle is the stack suffix from `next`
                    if let Some(start) = stack.iter().position(|&n| n == next) {
                        let cycle: Vec<String> =
                            stack[start..].iter().map(|s| s.to_string()).collect();
                        let mut key = cycle.clone();
                        key.sort_unstable();
                        if seen_cycles.insert(key) {
                            cycles.push(cycle);
                        }
                    }
                }
                Color::Black => {}
            }
        }
        stack.pop();
        color.insert(node, Color::Black);
    }

    let mut stack: Vec<&str> = Vec::new();
    for name in names {
        if color.get(name) == Some(&Color::White) {
            visit(name, &edges, &mut color, &mut stack, &mut cycles, &mut seen_cycles);
        }
    }
    cycles
}

/// Version conflicts: a capability required under ranges that no single
/// in-set provider version satisfies simultaneously
fn version_conflicts(working: &[ModuleDescriptor]) -> Vec<Conflict> {
    let index = CapabilityIndex::build(working.iter());
    // capability -> [(requirer, range text, parsed range)]
    let mut ranged: HashMap<&str, Vec<(&str, &str, VersionReq)>> = HashMap::new();
    for module in working {
        for requirement in &module.requires {
            let (capability, range) = split_requirement(requirement);
            if let Some(range) = range {
                if let Ok(req) = VersionReq::parse(range) {
                    ranged
                        .entry(capability)
                        .or_default()
                        .push((module.name.as_str(), range, req));
                }
            }
        }
    }

    let mut capabilities: Vec<&str> = ranged.keys().copied().collect();
    capabilities.sort_unstable();

    let mut conflicts = Vec::new();
    for capability in capabilities {
        let requirements = &ranged[capability];
        for (i, (name_a, range_a, req_a)) in requirements.iter().enumerate() {
            for (name_b, range_b, req_b) in &requirements[i + 1..] {
                if range_a == range_b {
                    continue;
                }
                let jointly_satisfiable = index
                    .providers_matching(capability, req_a)
                    .into_iter()
                    .any(|p| index.providers_matching(capability, req_b).contains(&p));
                if !jointly_satisfiable {
                    let mut pair = vec![name_a.to_string(), name_b.to_string()];
                    pair.sort_unstable();
                    conflicts.push(Conflict {
                        kind: ConflictKind::Version,
                        message: format!(
                            "no provider of '{}' satisfies both '{}' (from '{}') and '{}' (from '{}')",
                            capability, range_a, name_a, range_b, name_b
                        ),
                        modules: pair,
                    });
                }
            }
        }
    }
    conflicts
}

/// Kahn's algorithm along requires->provides edges; providers come before
/// their dependents. Ties break by descending priority, then ascending
/// name, so identical inputs always order identically.
fn topological_order(working: Vec<ModuleDescriptor>) -> Vec<ModuleDescriptor> {
    let edges = dependency_edges(&working);

    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for module in &working {
        in_degree.entry(module.name.as_str()).or_insert(0);
    }
    for (dependent, providers) in &edges {
        for provider in providers {
            dependents.entry(provider).or_default().push(dependent);
            *in_degree.entry(dependent).or_insert(0) += 1;
        }
    }

    let by_name: HashMap<&str, &ModuleDescriptor> =
        working.iter().map(|m| (m.name.as_str(), m)).collect();

    let mut ready: Vec<&str> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&name, _)| name)
        .collect();

    let mut order: Vec<String> = Vec::with_capacity(working.len());
    loop {
        // Highest priority first, then lexically smallest name
        let best = ready
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                let (pa, pb) = (by_name[**a].priority, by_name[**b].priority);
                pa.cmp(&pb).then(b.cmp(a))
            })
            .map(|(i, _)| i);
        let Some(best) = best else { break };
        let name = ready.remove(best);
        order.push(name.to_string());
        if let Some(deps) = dependents.get(name) {
            for &dependent in deps {
                let degree = in_degree.get_mut(dependent).unwrap();
                *degree -= 1;
                if *degree == 0 {
                    ready.push(dependent);
                }
            }
        }
    }

    // Nodes trapped in a cycle (already reported as a conflict) are
    // appended in the same deterministic tie-break order
    if order.len() < working.len() {
        let placed: HashSet<&str> = order.iter().map(String::as_str).collect();
        let mut rest: Vec<&str> = working
            .iter()
            .map(|m| m.name.as_str())
            .filter(|n| !placed.contains(n))
            .collect();
        rest.sort_by(|a, b| by_name[b].priority.cmp(&by_name[a].priority).then(a.cmp(b)));
        order.extend(rest.into_iter().map(String::from));
    }

    let mut remaining: HashMap<String, ModuleDescriptor> =
        working.into_iter().map(|m| (m.name.clone(), m)).collect();
    order
        .into_iter()
        .filter_map(|name| remaining.remove(&name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleType;
    use crate::registry::StaticRegistry;

    fn module(name: &str, module_type: ModuleType, priority: i32) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            module_type,
            category: String::new(),
            priority,
            provides: Vec::new(),
            requires: Vec::new(),
            compatible_with: Vec::new(),
            incompatible_with: Vec::new(),
            file_templates: Vec::new(),
        }
    }

    fn sample_registry() -> StaticRegistry {
        let mut vue = module("vue-base", ModuleType::FrontendFramework, 10);
        vue.version = "3.4.0".to_string();
        vue.provides = vec!["frontend".to_string(), "vue".to_string()];

        let mut react = module("react", ModuleType::FrontendFramework, 10);
        react.provides = vec!["react".to_string()];
        react.incompatible_with = vec!["vue".to_string()];

        let mut vuetify = module("vuetify", ModuleType::UiLibrary, 5);
        vuetify.provides = vec!["ui".to_string()];
        vuetify.requires = vec!["frontend".to_string()];

        let mut express = module("express", ModuleType::BackendService, 8);
        express.provides = vec!["http-server".to_string()];

        let mut auth = module("basic-auth", ModuleType::AuthProvider, 3);
        auth.provides = vec!["auth".to_string()];
        auth.requires = vec!["http-server".to_string()];

        StaticRegistry::new(vec![vue, react, vuetify, express, auth]).unwrap()
    }

    fn names(resolution: &Resolution) -> Vec<&str> {
        resolution.module_names()
    }

    #[test]
    fn test_auto_resolution_pulls_dependency_in_order() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(
            &["vuetify".to_string()],
            ResolveOptions {
                auto_resolve: true,
                allow_conflicts: false,
            },
        );

        assert!(resolution.success);
        assert_eq!(names(&resolution), vec!["vue-base", "vuetify"]);
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_missing_dependency_without_auto_resolve() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(&["vuetify".to_string()], ResolveOptions::default());

        assert!(!resolution.success);
        assert_eq!(
            resolution.errors,
            vec![ResolveIssue::MissingDependency {
                capability: "frontend".to_string(),
                required_by: "vuetify".to_string(),
            }]
        );
        // The suggestion engine proposes providers of the missing capability
        assert!(resolution.suggestions.iter().any(|s| s.module == "vue-base"));
    }

    #[test]
    fn test_shared_missing_capability_suggested_once() {
        let mut ui_a = module("aurora-ui", ModuleType::UiLibrary, 5);
        ui_a.requires = vec!["frontend".to_string()];
        let mut ui_b = module("zephyr-ui", ModuleType::UiLibrary, 5);
        ui_b.requires = vec!["frontend".to_string()];
        let mut vue = module("vue-base", ModuleType::FrontendFramework, 10);
        vue.provides = vec!["frontend".to_string()];
        let registry = StaticRegistry::new(vec![ui_a, ui_b, vue]).unwrap();

        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(
            &["aurora-ui".to_string(), "zephyr-ui".to_string()],
            ResolveOptions::default(),
        );

        // Both requirers surface as errors, but the provider is only
        // suggested once
        assert_eq!(resolution.errors.len(), 2);
        let vue_suggestions = resolution
            .suggestions
            .iter()
            .filter(|s| s.module == "vue-base")
            .count();
        assert_eq!(vue_suggestions, 1);
    }

    #[test]
    fn test_exclusive_conflict_blocks_resolution() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(
            &["vue-base".to_string(), "react".to_string()],
            ResolveOptions::default(),
        );

        assert!(!resolution.success);
        let exclusive = resolution.conflicts_of_kind(ConflictKind::Exclusive);
        assert_eq!(exclusive.len(), 1);
        assert_eq!(exclusive[0].modules, vec!["react", "vue-base"]);
    }

    #[test]
    fn test_direct_conflict_is_symmetric_and_deduplicated() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());

        let forward = resolver.resolve(
            &["vue-base".to_string(), "react".to_string()],
            ResolveOptions::default(),
        );
        let backward = resolver.resolve(
            &["react".to_string(), "vue-base".to_string()],
            ResolveOptions::default(),
        );

        for resolution in [&forward, &backward] {
            let direct = resolution.conflicts_of_kind(ConflictKind::Direct);
            assert_eq!(direct.len(), 1);
            assert_eq!(direct[0].modules, vec!["react", "vue-base"]);
        }
    }

    #[test]
    fn test_unknown_module_is_data_with_suggestions() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(&["vutify".to_string()], ResolveOptions::default());

        assert!(!resolution.success);
        assert_eq!(
            resolution.errors,
            vec![ResolveIssue::ModuleNotFound {
                name: "vutify".to_string()
            }]
        );
        assert!(resolution.suggestions.iter().any(|s| s.module == "vuetify"));
    }

    #[test]
    fn test_cycle_detected_and_terminates() {
        let mut a = module("alpha", ModuleType::Tooling, 0);
        a.provides = vec!["cap-a".to_string()];
        a.requires = vec!["cap-b".to_string()];
        let mut b = module("beta", ModuleType::Tooling, 0);
        b.provides = vec!["cap-b".to_string()];
        b.requires = vec!["cap-a".to_string()];
        let registry = StaticRegistry::new(vec![a, b]).unwrap();

        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(
            &["alpha".to_string(), "beta".to_string()],
            ResolveOptions::default(),
        );

        assert!(!resolution.success);
        let circular = resolution.conflicts_of_kind(ConflictKind::Circular);
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].modules.len(), 2);
    }

    #[test]
    fn test_version_conflict_between_requirers() {
        let mut vue3 = module("vue3", ModuleType::FrontendFramework, 10);
        vue3.version = "3.4.0".to_string();
        vue3.provides = vec!["frontend".to_string()];
        let mut legacy = module("legacy-ui", ModuleType::UiLibrary, 5);
        legacy.requires = vec!["frontend@^2.0".to_string()];
        let mut modern = module("modern-ui", ModuleType::UiLibrary, 5);
        modern.requires = vec!["frontend@^3.0".to_string()];
        let registry = StaticRegistry::new(vec![vue3, legacy, modern]).unwrap();

        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(
            &["vue3".to_string(), "legacy-ui".to_string(), "modern-ui".to_string()],
            ResolveOptions {
                auto_resolve: false,
                allow_conflicts: true,
            },
        );

        let version = resolution.conflicts_of_kind(ConflictKind::Version);
        assert_eq!(version.len(), 1);
        assert_eq!(version[0].modules, vec!["legacy-ui", "modern-ui"]);
    }

    #[test]
    fn test_idempotent_expansion() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let options = ResolveOptions {
            auto_resolve: true,
            allow_conflicts: false,
        };

        let first = resolver.resolve(&["vuetify".to_string()], options);
        let complete: Vec<String> = first.module_names().iter().map(|s| s.to_string()).collect();
        let second = resolver.resolve(&complete, options);

        assert!(second.success);
        assert_eq!(first.module_names(), second.module_names());
    }

    #[test]
    fn test_determinism_across_calls() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let options = ResolveOptions {
            auto_resolve: true,
            allow_conflicts: false,
        };
        let requested = vec![
            "basic-auth".to_string(),
            "vuetify".to_string(),
            "express".to_string(),
        ];

        let first = resolver.resolve(&requested, options);
        let second = resolver.resolve(&requested, options);
        assert_eq!(first.module_names(), second.module_names());

        // Providers always precede their dependents
        let order = first.module_names();
        let position = |name: &str| order.iter().position(|&n| n == name).unwrap();
        assert!(position("vue-base") < position("vuetify"));
        assert!(position("express") < position("basic-auth"));
    }

    #[test]
    fn test_cache_returns_shared_resolution() {
        let registry = sample_registry();
        let resolver = Resolver::new(&registry);
        let options = ResolveOptions {
            auto_resolve: true,
            allow_conflicts: false,
        };

        let first = resolver.resolve(&["vuetify".to_string()], options);
        let second = resolver.resolve(&["vuetify".to_string()], options);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_allow_conflicts_still_orders() {
        let registry = sample_registry();
        let resolver = Resolver::with_cache(&registry, ResolutionCache::disabled());
        let resolution = resolver.resolve(
            &["vue-base".to_string(), "react".to_string()],
            ResolveOptions {
                auto_resolve: false,
                allow_conflicts: true,
            },
        );

        assert!(resolution.success);
        assert!(!resolution.conflicts.is_empty());
        // Deterministic tie-break: equal priority, ascending name
        assert_eq!(names(&resolution), vec!["react", "vue-base"]);
    }
}
