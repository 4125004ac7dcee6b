//! Directory-backed module registry
//!
//! Loads every `*.yaml`/`*.yml` file under a modules directory as one
//! module descriptor. Malformed files are reported and skipped so one bad
//! descriptor does not take the whole registry down.

use anyhow::{Context, Result};
use colored::Colorize;
use modforge_core::module::ModuleDescriptor;
use modforge_core::registry::ModuleRegistry;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Environment variable overriding the default modules directory
pub const MODULES_DIR_ENV: &str = "MODFORGE_MODULES_DIR";

const DEFAULT_MODULES_DIR: &str = "modules";

/// Registry over descriptors loaded from a local directory
pub struct DirRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl DirRegistry {
    /// Resolve the modules directory: explicit flag, then env var, then
    /// `./modules`
    pub fn directory(flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| std::env::var(MODULES_DIR_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULES_DIR))
    }

    /// Load all descriptors under `dir`, skipping files that fail to
    /// parse or validate
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            anyhow::bail!("modules directory not found: {}", dir.display());
        }

        let mut modules: Vec<ModuleDescriptor> = Vec::new();
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if !is_yaml {
                continue;
            }

            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let descriptor: ModuleDescriptor = match serde_yaml::from_str(&content) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!(
                        "{} Skipping {}: {}",
                        "Warning:".yellow(),
                        path.display(),
                        e
                    );
                    continue;
                }
            };
            if let Err(e) = descriptor.validate() {
                eprintln!("{} Skipping {}: {}", "Warning:".yellow(), path.display(), e);
                continue;
            }
            if modules.iter().any(|m| m.name == descriptor.name) {
                eprintln!(
                    "{} Skipping {}: duplicate module name '{}'",
                    "Warning:".yellow(),
                    path.display(),
                    descriptor.name
                );
                continue;
            }
            modules.push(descriptor);
        }

        Ok(Self { modules })
    }
}

impl ModuleRegistry for DirRegistry {
    fn get_module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }

    fn all_modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }
}
