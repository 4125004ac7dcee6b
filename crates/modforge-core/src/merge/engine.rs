//! Template merge engine
//!
//! Consumes the resolver's ordered module list and produces the final
//! file tree. Contributions to each path are merged strategy-aware in
//! resolver order, staged fully in memory, and only then written out.
//! Any failure during the write phase removes everything written in this
//! run, leaving the target directory as it was before the call.

use crate::error::{GenerateError, MergeError};
use crate::merge::render;
use crate::merge::strategy::{self, CustomMerge, MergeValue};
use crate::module::{MergeStrategy, ModuleDescriptor, TemplateBody};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Variable substitutions and custom merge functions for one generate run
#[derive(Default)]
pub struct GenerateContext {
    pub project_name: String,
    pub variables: HashMap<String, String>,
    custom_mergers: HashMap<String, Arc<dyn CustomMerge>>,
}

impl GenerateContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Register a custom merge function under the name modules reference
    /// with `strategy: custom:<name>`
    pub fn register_merger(mut self, name: impl Into<String>, merger: Arc<dyn CustomMerge>) -> Self {
        self.custom_mergers.insert(name.into(), merger);
        self
    }

    /// All variables visible to templates; `project_name` is always defined
    fn template_variables(&self) -> HashMap<String, String> {
        let mut variables = self.variables.clone();
        variables
            .entry("project_name".to_string())
            .or_insert_with(|| self.project_name.clone());
        variables
    }
}

/// Machine-readable result of a generate run, consumable by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    pub files_written: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// One module's rendered contribution to a path
struct Contribution {
    module: String,
    body: String,
    strategy: MergeStrategy,
}

/// Merge all module file templates and write the result under `target`.
/// All-or-nothing: on any error the target directory is left untouched.
pub async fn generate(
    modules: &[ModuleDescriptor],
    context: &GenerateContext,
    target: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let variables = context.template_variables();
    let mut warnings = Vec::new();

    // Collect: contribution lists keep resolver order per path
    let mut plan: BTreeMap<String, Vec<Contribution>> = BTreeMap::new();
    for module in modules {
        for template in &module.file_templates {
            let body = match &template.body {
                TemplateBody::Static(content) => content.clone(),
                TemplateBody::Templated(content) => render::render(content, &variables)
                    .map_err(|variable| MergeError::UndefinedVariable {
                        path: template.path.clone(),
                        module: module.name.clone(),
                        variable,
                    })?,
            };
            plan.entry(template.path.clone()).or_default().push(Contribution {
                module: module.name.clone(),
                body,
                strategy: template.strategy.clone(),
            });
        }
    }

    // Stage: merge every path in memory before touching the filesystem
    let mut staged: Vec<(String, String)> = Vec::new();
    for (path, contributions) in &plan {
        let content = merge_path(path, contributions, context, &mut warnings)?;
        staged.push((path.clone(), content));
    }

    commit(staged, target, warnings).await
}

/// Pick the effective strategy for a path and run it
fn merge_path(
    path: &str,
    contributions: &[Contribution],
    context: &GenerateContext,
    warnings: &mut Vec<String>,
) -> Result<String, MergeError> {
    // The most information-preserving strategy wins; first contributor
    // with the winning precedence defines it
    let effective = contributions
        .iter()
        .enumerate()
        .max_by_key(|(i, c)| (c.strategy.precedence(), std::cmp::Reverse(*i)))
        .map(|(_, c)| c.strategy.clone())
        .expect("contribution list for a planned path is never empty");

    for contribution in contributions {
        if contribution.strategy != effective {
            warnings.push(format!(
                "{}: strategy '{}' from module '{}' overridden by '{}'",
                path,
                contribution.strategy.display_name(),
                contribution.module,
                effective.display_name()
            ));
        }
    }

    let bodies: Vec<String> = contributions.iter().map(|c| c.body.clone()).collect();

    match &effective {
        MergeStrategy::Replace => {
            let last = contributions.last().expect("non-empty");
            if contributions.len() > 1 {
                warnings.push(format!(
                    "{}: {} modules target this path with 'replace', keeping '{}'",
                    path,
                    contributions.len(),
                    last.module
                ));
            }
            Ok(last.body.clone())
        }
        MergeStrategy::Append => Ok(strategy::append(&bodies)),
        MergeStrategy::Prepend => Ok(strategy::prepend(&bodies)),
        MergeStrategy::AppendUnique => Ok(strategy::append_unique(&bodies)),
        MergeStrategy::MergeJson => {
            let mut accumulated: Option<serde_json::Value> = None;
            for contribution in contributions {
                let value: serde_json::Value = serde_json::from_str(&contribution.body)
                    .map_err(|source| MergeError::InvalidJson {
                        path: path.to_string(),
                        module: contribution.module.clone(),
                        source,
                    })?;
                match &mut accumulated {
                    Some(acc) => strategy::deep_merge_json(acc, value),
                    None => accumulated = Some(value),
                }
            }
            Ok(MergeValue::Structured(accumulated.unwrap_or(serde_json::Value::Null))
                .into_output())
        }
        MergeStrategy::Custom(name) => {
            let merger = context.custom_mergers.get(name).ok_or_else(|| {
                MergeError::UnknownMergeFunction {
                    path: path.to_string(),
                    module: contributions
                        .iter()
                        .find(|c| c.strategy == effective)
                        .map(|c| c.module.clone())
                        .unwrap_or_default(),
                    name: name.clone(),
                }
            })?;

            let mut accumulated: Option<MergeValue> = None;
            for contribution in contributions {
                let incoming = MergeValue::Text(contribution.body.clone());
                let merged = merger
                    .merge(accumulated.as_ref(), &incoming)
                    .map_err(|message| MergeError::CustomMergeFailed {
                        path: path.to_string(),
                        name: name.clone(),
                        message,
                    })?;
                // Black box, but the declared shape is a hard contract
                if merged.shape() != merger.output_shape() {
                    return Err(MergeError::CustomMergeShape {
                        path: path.to_string(),
                        name: name.clone(),
                        expected: match merger.output_shape() {
                            strategy::MergeShape::Text => "text",
                            strategy::MergeShape::Structured => "structured",
                        },
                        returned: merged.shape_name(),
                    });
                }
                accumulated = Some(merged);
            }
            Ok(accumulated
                .unwrap_or(MergeValue::Text(String::new()))
                .into_output())
        }
    }
}

/// Write phase: flush staged content, rolling back on any failure.
/// Files that already exist at a staged path are read into memory first
/// so rollback can restore them byte for byte.
async fn commit(
    staged: Vec<(String, String)>,
    target: &Path,
    warnings: Vec<String>,
) -> Result<GenerateSummary, GenerateError> {
    let mut files_written: Vec<PathBuf> = Vec::new();
    let mut created: Vec<PathBuf> = Vec::new();
    let mut replaced: Vec<(PathBuf, Vec<u8>)> = Vec::new();

    for (relative, content) in &staged {
        let path = target.join(relative);
        let original = fs::read(&path).await.ok();
        if let Err(source) = write_file(&path, content).await {
            rollback(&created, &replaced, target).await;
            return Err(GenerateError::Io { path, source });
        }
        match original {
            Some(bytes) => replaced.push((path.clone(), bytes)),
            None => created.push(path.clone()),
        }
        files_written.push(path);
    }

    Ok(GenerateSummary {
        files_written,
        warnings,
    })
}

async fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content).await
}

/// Undo a partial commit: remove files this run created, put back the
/// saved content of files it overwrote, then prune any directories the
/// removals left empty (up to, but not including, the target root)
async fn rollback(created: &[PathBuf], replaced: &[(PathBuf, Vec<u8>)], target: &Path) {
    for path in created {
        let _ = fs::remove_file(path).await;
        let mut dir = path.parent();
        while let Some(d) = dir {
            if d == target {
                break;
            }
            // Fails (and stops) on non-empty directories, which is the point
            if fs::remove_dir(d).await.is_err() {
                break;
            }
            dir = d.parent();
        }
    }
    for (path, original) in replaced {
        let _ = fs::write(path, original).await;
    }
}
