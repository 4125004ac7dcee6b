//! Modforge CLI - assemble projects from composable modules

mod registry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use modforge_core::merge::{generate, GenerateContext};
use modforge_core::registry::ModuleRegistry;
use modforge_core::resolver::{Resolution, ResolveOptions, Resolver};
use registry::DirRegistry;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "modforge",
    version,
    about = "Assemble a working project from composable modules"
)]
struct Cli {
    /// Directory containing module descriptors (*.yaml)
    #[arg(long, global = true)]
    modules_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available modules
    List {
        /// Only modules in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Resolve a module selection without generating anything
    Resolve {
        /// Module names to resolve
        #[arg(required = true)]
        modules: Vec<String>,

        /// Pull in providers for unsatisfied capabilities
        #[arg(long)]
        auto_resolve: bool,

        /// Order the selection even when conflicts were found
        #[arg(long)]
        allow_conflicts: bool,
    },

    /// Create a new project from a module selection
    New {
        /// Project name (also the target directory unless --dir is given)
        name: String,

        /// Module names, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        modules: Vec<String>,

        /// Target directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Template variable, `name=value` (repeatable)
        #[arg(long = "var", value_parser = parse_variable)]
        variables: Vec<(String, String)>,
    },
}

fn parse_variable(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = DirRegistry::directory(cli.modules_dir.clone());
    let registry = DirRegistry::load(&dir)
        .with_context(|| format!("failed to load module registry from {}", dir.display()))?;

    match cli.command {
        Commands::List { category } => list_modules(&registry, category.as_deref()),
        Commands::Resolve {
            modules,
            auto_resolve,
            allow_conflicts,
        } => {
            let resolution = run_resolve(
                &registry,
                &modules,
                ResolveOptions {
                    auto_resolve,
                    allow_conflicts,
                },
            );
            report_resolution(&resolution);
            if !resolution.success {
                std::process::exit(1);
            }
        }
        Commands::New {
            name,
            modules,
            dir,
            variables,
        } => {
            let resolution = run_resolve(
                &registry,
                &modules,
                ResolveOptions {
                    auto_resolve: true,
                    allow_conflicts: false,
                },
            );
            report_resolution(&resolution);
            if !resolution.success {
                std::process::exit(1);
            }

            let target = dir.unwrap_or_else(|| PathBuf::from(&name));
            let mut context = GenerateContext::new(name.clone());
            for (key, value) in variables {
                context = context.with_variable(key, value);
            }

            let summary = generate(&resolution.modules, &context, &target)
                .await
                .with_context(|| format!("failed to generate project in {}", target.display()))?;

            for warning in &summary.warnings {
                eprintln!("{} {}", "Warning:".yellow(), warning);
            }
            println!();
            println!(
                "{} {} file(s) in {}",
                "Created".green().bold(),
                summary.files_written.len(),
                target.display()
            );
            for path in &summary.files_written {
                println!("  {} {}", "->".blue(), path.display());
            }
        }
    }

    Ok(())
}

fn list_modules<R: ModuleRegistry>(registry: &R, category: Option<&str>) {
    let modules = match category {
        Some(category) => registry.modules_by_category(category),
        None => registry.all_modules().iter().collect(),
    };
    if modules.is_empty() {
        println!("No modules found.");
        return;
    }
    for module in modules {
        println!(
            "  {} {} ({}, {})",
            module.name.cyan().bold(),
            module.version,
            module.module_type,
            if module.category.is_empty() {
                "uncategorized"
            } else {
                &module.category
            }
        );
        if !module.provides.is_empty() {
            println!("      provides: {}", module.provides.join(", "));
        }
        if !module.requires.is_empty() {
            println!("      requires: {}", module.requires.join(", "));
        }
    }
}

fn run_resolve<R: ModuleRegistry>(
    registry: &R,
    modules: &[String],
    options: ResolveOptions,
) -> std::sync::Arc<Resolution> {
    let resolver = Resolver::new(registry);
    resolver.resolve(modules, options)
}

fn report_resolution(resolution: &Resolution) {
    for error in &resolution.errors {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }
    for conflict in &resolution.conflicts {
        eprintln!(
            "{} [{}] {}",
            "Conflict:".red().bold(),
            conflict.kind,
            conflict.message
        );
    }
    for warning in &resolution.warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }
    if !resolution.suggestions.is_empty() {
        eprintln!("{}", "Did you mean:".cyan());
        for suggestion in &resolution.suggestions {
            eprintln!("  {} ({})", suggestion.module.cyan().bold(), suggestion.reason);
        }
    }

    if resolution.success {
        println!("{}", "Resolved module order:".green().bold());
        for module in &resolution.modules {
            println!(
                "  {} {} {}",
                "->".blue(),
                module.name.cyan(),
                module.version.dimmed()
            );
        }
    }
}
