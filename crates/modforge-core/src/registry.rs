//! Module registry interface
//!
//! The resolver treats the registry as an immutable, read-only snapshot for
//! the duration of one resolve call. Where descriptors come from (disk,
//! network, compiled-in) is the caller's business; the CLI ships a
//! directory-backed implementation, tests use [`StaticRegistry`].

use crate::module::ModuleDescriptor;

/// Read-only lookup service over a set of module descriptors
pub trait ModuleRegistry {
    /// Look up a module by its unique name
    fn get_module(&self, name: &str) -> Option<&ModuleDescriptor>;

    /// Every module known to this registry
    fn all_modules(&self) -> &[ModuleDescriptor];

    /// Modules whose category equals `category`
    fn modules_by_category(&self, category: &str) -> Vec<&ModuleDescriptor> {
        self.all_modules()
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Substring search over name, category, and provided capabilities
    fn search(&self, query: &str) -> Vec<&ModuleDescriptor> {
        let query = query.to_ascii_lowercase();
        self.all_modules()
            .iter()
            .filter(|m| {
                m.name.to_ascii_lowercase().contains(&query)
                    || m.category.to_ascii_lowercase().contains(&query)
                    || m.provides
                        .iter()
                        .any(|p| p.to_ascii_lowercase().contains(&query))
            })
            .collect()
    }
}

/// In-memory registry over a fixed descriptor list
///
/// Descriptors are validated up front; construction fails on a malformed
/// descriptor because registry content is programmer input, not user input.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl StaticRegistry {
    pub fn new(modules: Vec<ModuleDescriptor>) -> anyhow::Result<Self> {
        for module in &modules {
            module.validate()?;
        }
        Ok(Self { modules })
    }
}

impl ModuleRegistry for StaticRegistry {
    fn get_module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }

    fn all_modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }
}
