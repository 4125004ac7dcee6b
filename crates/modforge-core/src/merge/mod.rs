//! Template merging and project generation
//!
//! This module provides:
//! - Merge strategy implementations (replace, JSON deep-merge, append
//!   variants, custom merge functions)
//! - Variable substitution for templated bodies
//! - The generate pipeline: collect, render, merge, stage, commit

pub mod engine;
pub mod render;
pub mod strategy;

pub use engine::{generate, GenerateContext, GenerateSummary};
pub use strategy::{CustomMerge, MergeShape, MergeValue};
