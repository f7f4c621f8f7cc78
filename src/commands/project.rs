use crate::catalog;
use crate::cli::{Cli, Commands};
use crate::domain::models::{InitReport, Lockfile, ProjectConfig};
use crate::services::installer::{add_pattern, require_project, update_patterns};
use crate::services::output::{emit_json, emit_rows, emit_value};
use crate::services::storage::{self, load_lock};
use crate::services::theme::render_theme_config;
use std::path::Path;

pub fn handle_project_commands(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init {
            patterns_dir,
            theme_file,
            force,
        } => {
            let report = init_project(patterns_dir, theme_file, *force)?;
            storage::audit(
                "init",
                serde_json::json!({"patternsDir": patterns_dir, "created": report.created}),
            );
            emit_value(cli.json, report, |r| {
                format!(
                    "initialized ({} created, {} skipped)",
                    r.created.len(),
                    r.skipped.len()
                )
            })?;
        }
        Commands::Add { pattern, force } => {
            let config = require_project()?;
            let mut lock = load_lock()?;
            let entry = add_pattern(&cli.catalog, &config, &mut lock, pattern, *force)?;
            emit_value(cli.json, entry, |e| {
                format!("installed {}@{}", e.name, e.catalog)
            })?;
        }
        Commands::Update { pattern } => {
            let config = require_project()?;
            let mut lock = load_lock()?;
            let reports = update_patterns(&cli.catalog, &config, &mut lock, pattern.as_deref())?;
            emit_rows(cli.json, &reports, |r| format!("{}\t{}", r.name, r.status))?;
        }
        Commands::List => {
            let lock = load_lock()?;
            emit_rows(cli.json, &lock.patterns, |p| {
                format!(
                    "{}\t{}\t{}",
                    p.name,
                    p.version.as_deref().unwrap_or("n/a"),
                    &p.digest[..p.digest.len().min(12)]
                )
            })?;
        }
        Commands::Search { query } => {
            let loaded = catalog::load_catalog(&cli.catalog)?;
            let items = catalog::search(&loaded, query.as_deref());
            emit_rows(cli.json, &items, |p| {
                format!(
                    "{}\t{}\t{}",
                    p.name,
                    p.version.as_deref().unwrap_or("n/a"),
                    p.description.as_deref().unwrap_or("")
                )
            })?;
        }
        Commands::Info { pattern } => {
            let loaded = catalog::load_catalog(&cli.catalog)?;
            let p = catalog::find(&loaded, pattern)?.clone();
            if cli.json {
                emit_json(&p)?;
            } else {
                println!("catalog: {}", loaded.name);
                println!("name: {}", p.name);
                println!("version: {}", p.version.unwrap_or_else(|| "n/a".to_string()));
                println!("description: {}", p.description.unwrap_or_default());
                if !p.tags.is_empty() {
                    println!("tags: {}", p.tags.join(", "));
                }
            }
        }
        Commands::Validate => {
            let loaded = catalog::load_catalog(&cli.catalog)?;
            catalog::validate(&loaded, &cli.catalog)?;
            emit_value(cli.json, "valid", |_| "catalog valid".to_string())?;
        }
        Commands::Audit { .. } => unreachable!("audit is dispatched before project commands"),
    }

    Ok(())
}

fn init_project(patterns_dir: &str, theme_file: &str, force: bool) -> anyhow::Result<InitReport> {
    let mut created = Vec::new();
    let mut skipped = Vec::new();

    if Path::new(patterns_dir).is_dir() {
        skipped.push(patterns_dir.to_string());
    } else {
        std::fs::create_dir_all(patterns_dir)?;
        created.push(patterns_dir.to_string());
    }

    if storage::config_path().exists() && !force {
        skipped.push(storage::CONFIG_FILE.to_string());
    } else {
        storage::save_config(&ProjectConfig {
            patterns_dir: patterns_dir.to_string(),
            theme_file: theme_file.to_string(),
        })?;
        created.push(storage::CONFIG_FILE.to_string());
    }

    if Path::new(theme_file).exists() && !force {
        skipped.push(theme_file.to_string());
    } else {
        std::fs::write(theme_file, render_theme_config())?;
        created.push(theme_file.to_string());
    }

    if storage::lock_path().exists() {
        skipped.push(storage::LOCK_FILE.to_string());
    } else {
        storage::save_lock(&Lockfile {
            version: 1,
            patterns: vec![],
        })?;
        created.push(storage::LOCK_FILE.to_string());
    }

    Ok(InitReport { created, skipped })
}
