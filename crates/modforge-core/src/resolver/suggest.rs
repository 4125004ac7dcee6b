//! Suggestion engine: ranked alternatives for failed selections
//!
//! Invoked when a requested name is unknown or a capability cannot be
//! satisfied. Ranks registry modules by declared priority, compatibility
//! with the current working set, and (for misspelled names) string
//! similarity. Returning an empty list is valid.

use crate::module::{split_requirement, ModuleDescriptor};
use crate::registry::ModuleRegistry;
use crate::resolver::resolution::Suggestion;

/// How many suggestions a single failure produces at most
const TOP_K: usize = 3;

/// Penalty applied per conflict a candidate would introduce
const CONFLICT_PENALTY: i64 = 25;

/// Rank modules that provide `requirement` (a `cap` or `cap@range` entry)
pub fn suggest_for_capability<R: ModuleRegistry + ?Sized>(
    registry: &R,
    requirement: &str,
    working_set: &[ModuleDescriptor],
) -> Vec<Suggestion> {
    let (capability, _) = split_requirement(requirement);
    let mut candidates: Vec<Suggestion> = registry
        .all_modules()
        .iter()
        .filter(|m| m.provides.iter().any(|p| p == capability))
        .filter(|m| !working_set.iter().any(|w| w.name == m.name))
        .map(|m| Suggestion {
            module: m.name.clone(),
            reason: format!("provides '{}'", capability),
            score: i64::from(m.priority) * 10 - compatibility_penalty(m, working_set),
        })
        .collect();
    rank(&mut candidates);
    candidates
}

/// Rank modules whose name resembles a rejected token
pub fn suggest_for_name<R: ModuleRegistry + ?Sized>(
    registry: &R,
    rejected: &str,
    working_set: &[ModuleDescriptor],
) -> Vec<Suggestion> {
    let mut candidates: Vec<Suggestion> = registry
        .all_modules()
        .iter()
        .filter_map(|m| {
            let distance = levenshtein(&m.name.to_ascii_lowercase(), &rejected.to_ascii_lowercase());
            let longest = m.name.len().max(rejected.len());
            // More than half the characters differing is noise, not a typo
            if distance * 2 > longest {
                return None;
            }
            let similarity = (longest - distance) as i64 * 10;
            Some(Suggestion {
                module: m.name.clone(),
                reason: format!("name similar to '{}'", rejected),
                score: similarity + i64::from(m.priority)
                    - compatibility_penalty(m, working_set),
            })
        })
        .collect();
    rank(&mut candidates);
    candidates
}

/// Conflicts the candidate would introduce into the working set
fn compatibility_penalty(candidate: &ModuleDescriptor, working_set: &[ModuleDescriptor]) -> i64 {
    let mut introduced = 0;
    for member in working_set {
        if candidate.is_incompatible_with(member) || member.is_incompatible_with(candidate) {
            introduced += 1;
        }
        if candidate.module_type.is_exclusive()
            && member.module_type == candidate.module_type
            && member.name != candidate.name
        {
            introduced += 1;
        }
    }
    introduced * CONFLICT_PENALTY
}

fn rank(candidates: &mut Vec<Suggestion>) {
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.module.cmp(&b.module)));
    candidates.truncate(TOP_K);
}

/// Classic two-row edit distance
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleType;
    use crate::registry::StaticRegistry;

    fn module(name: &str, module_type: ModuleType, priority: i32, provides: &[&str]) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            module_type,
            category: String::new(),
            priority,
            provides: provides.iter().map(|s| s.to_string()).collect(),
            requires: Vec::new(),
            compatible_with: Vec::new(),
            incompatible_with: Vec::new(),
            file_templates: Vec::new(),
        }
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("vue", "vue"), 0);
        assert_eq!(levenshtein("vue", "vu"), 1);
        assert_eq!(levenshtein("react", "vue"), 5);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_capability_suggestions_ranked_by_priority() {
        let registry = StaticRegistry::new(vec![
            module("aurora-ui", ModuleType::UiLibrary, 1, &["ui"]),
            module("zephyr-ui", ModuleType::UiLibrary, 8, &["ui"]),
            module("express", ModuleType::BackendService, 9, &["http-server"]),
        ])
        .unwrap();

        let suggestions = suggest_for_capability(&registry, "ui", &[]);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].module, "zephyr-ui");
        assert_eq!(suggestions[1].module, "aurora-ui");
    }

    #[test]
    fn test_capability_suggestions_penalize_conflicts() {
        let mut clashing = module("clashing-ui", ModuleType::UiLibrary, 9, &["ui"]);
        clashing.incompatible_with = vec!["vue-base".to_string()];
        let registry = StaticRegistry::new(vec![
            clashing,
            module("friendly-ui", ModuleType::UiLibrary, 8, &["ui"]),
        ])
        .unwrap();
        let working = vec![module("vue-base", ModuleType::FrontendFramework, 10, &["frontend"])];

        let suggestions = suggest_for_capability(&registry, "ui", &working);
        assert_eq!(suggestions[0].module, "friendly-ui");
    }

    #[test]
    fn test_name_suggestions_find_typos() {
        let registry = StaticRegistry::new(vec![
            module("vuetify", ModuleType::UiLibrary, 5, &["ui"]),
            module("express", ModuleType::BackendService, 5, &["http-server"]),
        ])
        .unwrap();

        let suggestions = suggest_for_name(&registry, "vutify", &[]);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].module, "vuetify");
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let registry = StaticRegistry::new(vec![module(
            "express",
            ModuleType::BackendService,
            5,
            &["http-server"],
        )])
        .unwrap();
        assert!(suggest_for_capability(&registry, "quantum", &[]).is_empty());
        assert!(suggest_for_name(&registry, "zzzzzzzz", &[]).is_empty());
    }
}
