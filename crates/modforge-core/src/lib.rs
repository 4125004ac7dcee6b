//! Modforge Core - Shared library for composable project scaffolding
//!
//! This library assembles a working application from independently
//! authored building blocks ("modules": frontend frameworks, UI
//! libraries, backend services, auth providers, deployment targets).
//! A caller selects modules; the resolver expands the selection into a
//! complete, conflict-free, deterministically ordered set, and the merge
//! engine combines each module's file contributions into one coherent
//! project tree.
//!
//! # Architecture
//!
//! - **Data model** - [`module`] descriptors and the [`registry`] lookup
//!   trait. The registry is an injected, immutable snapshot; where
//!   descriptors come from is the caller's concern.
//! - **Resolution** - [`resolver`]: capability index, fixed-point
//!   expansion, four-class conflict detection, topological ordering, and
//!   an injected LRU cache. Resolution problems are data on the
//!   [`Resolution`](resolver::Resolution), never errors.
//! - **Generation** - [`merge`]: strategy-aware merging of per-path
//!   contributions, staged fully in memory, committed all-or-nothing.
//!
//! # Example Usage
//!
//! ```ignore
//! use modforge_core::registry::StaticRegistry;
//! use modforge_core::resolver::{Resolver, ResolveOptions};
//! use modforge_core::merge::{generate, GenerateContext};
//!
//! let registry = StaticRegistry::new(descriptors)?;
//! let resolver = Resolver::new(&registry);
//! let resolution = resolver.resolve(&selected, ResolveOptions {
//!     auto_resolve: true,
//!     allow_conflicts: false,
//! });
//! if resolution.success {
//!     let context = GenerateContext::new("my-app");
//!     let summary = generate(&resolution.modules, &context, target).await?;
//! }
//! ```

pub mod error;
pub mod merge;
pub mod module;
pub mod registry;
pub mod resolver;

// Re-export main types for convenience
pub use error::{GenerateError, MergeError};
pub use merge::{generate, GenerateContext, GenerateSummary};
pub use module::{FileTemplate, MergeStrategy, ModuleDescriptor, ModuleType, TemplateBody};
pub use registry::{ModuleRegistry, StaticRegistry};
pub use resolver::{Resolution, ResolutionCache, ResolveOptions, Resolver};
