//! Merge strategy implementations
//!
//! Pure functions combining N rendered contributions into one output
//! value, plus the typed contract for module-supplied custom mergers.

use serde_json::Value;

/// Shape of a merged value, declared up front by custom mergers so the
/// engine can validate what comes back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeShape {
    Text,
    Structured,
}

/// A value flowing through a merge pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum MergeValue {
    Text(String),
    Structured(Value),
}

impl MergeValue {
    pub fn shape(&self) -> MergeShape {
        match self {
            MergeValue::Text(_) => MergeShape::Text,
            MergeValue::Structured(_) => MergeShape::Structured,
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self.shape() {
            MergeShape::Text => "text",
            MergeShape::Structured => "structured",
        }
    }

    /// Serialized file content for this value
    pub fn into_output(self) -> String {
        match self {
            MergeValue::Text(s) => s,
            MergeValue::Structured(v) => {
                let mut out = serde_json::to_string_pretty(&v).unwrap_or_default();
                out.push('\n');
                out
            }
        }
    }
}

/// Module-supplied merge function with a declared output shape
///
/// The engine folds contributions left to right: `accumulated` is `None`
/// for the first contribution. Implementations report failures as
/// messages; the engine wraps them with path context.
pub trait CustomMerge: Send + Sync {
    /// Shape every returned value must have
    fn output_shape(&self) -> MergeShape;

    fn merge(
        &self,
        accumulated: Option<&MergeValue>,
        incoming: &MergeValue,
    ) -> Result<MergeValue, String>;
}

/// Deep-merge `incoming` into `accumulated`:
/// objects merge recursively, array leaves union with first-seen order,
/// scalar leaves take the later contributor's value.
pub fn deep_merge_json(accumulated: &mut Value, incoming: Value) {
    match (accumulated, incoming) {
        (Value::Object(acc), Value::Object(new)) => {
            for (key, value) in new {
                match acc.get_mut(&key) {
                    Some(existing) => deep_merge_json(existing, value),
                    None => {
                        acc.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(acc), Value::Array(new)) => {
            for item in new {
                if !acc.contains(&item) {
                    acc.push(item);
                }
            }
        }
        (acc, new) => *acc = new,
    }
}

/// Concatenate contributions with a separating line break
pub fn append(contributions: &[String]) -> String {
    contributions
        .iter()
        .map(|c| c.trim_end_matches('\n'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `append` with the concatenation direction reversed
pub fn prepend(contributions: &[String]) -> String {
    let reversed: Vec<String> = contributions.iter().rev().cloned().collect();
    append(&reversed)
}

/// Concatenate line-by-line, keeping the first occurrence of each exact
/// line and dropping later duplicates
pub fn append_unique(contributions: &[String]) -> String {
    let mut seen = std::collections::HashSet::new();
    let mut lines: Vec<&str> = Vec::new();
    for contribution in contributions {
        for line in contribution.lines() {
            if seen.insert(line) {
                lines.push(line);
            }
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_json_package_manifests() {
        let mut acc = json!({"dependencies": {"vue": "^3.4.0"}});
        deep_merge_json(
            &mut acc,
            json!({"dependencies": {"vuetify": "^3.5.0"}, "scripts": {"dev": "vite"}}),
        );
        assert_eq!(
            acc,
            json!({
                "dependencies": {"vue": "^3.4.0", "vuetify": "^3.5.0"},
                "scripts": {"dev": "vite"}
            })
        );
    }

    #[test]
    fn test_deep_merge_json_scalar_later_wins() {
        let mut acc = json!({"name": "old", "port": 3000});
        deep_merge_json(&mut acc, json!({"name": "new"}));
        assert_eq!(acc, json!({"name": "new", "port": 3000}));
    }

    #[test]
    fn test_deep_merge_json_array_union_first_seen() {
        let mut acc = json!({"tags": ["a", "b"]});
        deep_merge_json(&mut acc, json!({"tags": ["b", "c"]}));
        assert_eq!(acc, json!({"tags": ["a", "b", "c"]}));
    }

    #[test]
    fn test_append_and_prepend() {
        let parts = vec!["first\n".to_string(), "second".to_string()];
        assert_eq!(append(&parts), "first\nsecond");
        assert_eq!(prepend(&parts), "second\nfirst");
    }

    #[test]
    fn test_append_unique_drops_duplicate_lines() {
        let parts = vec![
            ".env\nnode_modules/".to_string(),
            ".env\ndist/".to_string(),
        ];
        assert_eq!(append_unique(&parts), ".env\nnode_modules/\ndist/");
    }

    #[test]
    fn test_structured_output_ends_with_newline() {
        let value = MergeValue::Structured(json!({"a": 1}));
        assert!(value.into_output().ends_with('\n'));
    }
}
