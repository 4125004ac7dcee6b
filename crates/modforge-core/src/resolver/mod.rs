//! Module dependency resolution
//!
//! This module provides:
//! - Capability indexing over candidate module sets
//! - The dependency resolver (expansion, conflict detection, ordering)
//! - Memoization of resolver output (bounded LRU)
//! - Ranked suggestions for failed selections

pub mod cache;
pub mod capability;
pub mod engine;
pub mod resolution;
pub mod suggest;

pub use cache::ResolutionCache;
pub use capability::CapabilityIndex;
pub use engine::Resolver;
pub use resolution::{
    Conflict, ConflictKind, Resolution, ResolveIssue, ResolveOptions, Suggestion,
};
pub use suggest::{suggest_for_capability, suggest_for_name};
