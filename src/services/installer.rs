use crate::catalog;
use crate::domain::models::{InstalledPattern, Lockfile, ProjectConfig, UpdateReport};
use crate::services::storage::{self, copy_bundle, digest_dir, upsert_installed};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("not a patkit project (run `patkit init` first)")]
    NotInitialized,
    #[error("pattern already installed: {0} (use --force to overwrite)")]
    AlreadyInstalled(String),
    #[error("pattern not installed: {0}")]
    NotInstalled(String),
}

impl ProjectError {
    pub fn code(&self) -> &'static str {
        match self {
            ProjectError::NotInitialized => "NOT_INITIALIZED",
            ProjectError::AlreadyInstalled(_) => "ALREADY_INSTALLED",
            ProjectError::NotInstalled(_) => "NOT_INSTALLED",
        }
    }
}

pub fn require_project() -> anyhow::Result<ProjectConfig> {
    storage::load_config()?.ok_or_else(|| ProjectError::NotInitialized.into())
}

pub fn add_pattern(
    catalog_source: &str,
    config: &ProjectConfig,
    lock: &mut Lockfile,
    name: &str,
    force: bool,
) -> anyhow::Result<InstalledPattern> {
    let loaded = catalog::load_catalog(catalog_source)?;
    let pattern = catalog::find(&loaded, name)?;

    if !force && lock.patterns.iter().any(|p| p.name == name) {
        return Err(ProjectError::AlreadyInstalled(name.to_string()).into());
    }

    let src = catalog::resolve_pattern_path(catalog_source, pattern)?;
    let dst = Path::new(&config.patterns_dir).join(&pattern.name);
    let files = copy_bundle(&src, &dst)?;
    let digest = digest_dir(&dst)?;

    let entry = InstalledPattern {
        name: pattern.name.clone(),
        catalog: loaded.name.clone(),
        source: pattern.source.clone(),
        version: pattern.version.clone(),
        digest,
        files,
    };
    upsert_installed(lock, entry.clone());
    storage::save_lock(lock)?;
    storage::audit(
        "add",
        serde_json::json!({"pattern": entry.name, "catalog": entry.catalog}),
    );
    Ok(entry)
}

/// Re-resolve installed patterns against the catalog and re-copy the ones
/// whose catalog content changed, or whose installed tree drifted from the
/// lock digest.
pub fn update_patterns(
    catalog_source: &str,
    config: &ProjectConfig,
    lock: &mut Lockfile,
    only: Option<&str>,
) -> anyhow::Result<Vec<UpdateReport>> {
    if let Some(name) = only {
        if !lock.patterns.iter().any(|p| p.name == name) {
            return Err(ProjectError::NotInstalled(name.to_string()).into());
        }
    }

    let loaded = catalog::load_catalog(catalog_source)?;
    let mut reports = Vec::new();

    for installed in &mut lock.patterns {
        if only.map(|o| o != installed.name).unwrap_or(false) {
            continue;
        }

        let Ok(pattern) = catalog::find(&loaded, &installed.name) else {
            reports.push(UpdateReport {
                name: installed.name.clone(),
                status: "missing_from_catalog".to_string(),
                old_version: installed.version.clone(),
                new_version: None,
            });
            continue;
        };

        let src = catalog::resolve_pattern_path(catalog_source, pattern)?;
        let dst = Path::new(&config.patterns_dir).join(&installed.name);

        let catalog_digest = digest_dir(&src)?;
        let local_digest = if dst.is_dir() {
            digest_dir(&dst)?
        } else {
            String::new()
        };

        let catalog_changed = catalog_digest != installed.digest;
        let locally_modified = local_digest != installed.digest;

        if !catalog_changed && !locally_modified {
            reports.push(UpdateReport {
                name: installed.name.clone(),
                status: "up_to_date".to_string(),
                old_version: installed.version.clone(),
                new_version: pattern.version.clone(),
            });
            continue;
        }

        let files = copy_bundle(&src, &dst)?;
        let report = UpdateReport {
            name: installed.name.clone(),
            status: if locally_modified {
                "modified_locally".to_string()
            } else {
                "updated".to_string()
            },
            old_version: installed.version.clone(),
            new_version: pattern.version.clone(),
        };
        installed.version = pattern.version.clone();
        installed.source = pattern.source.clone();
        installed.digest = catalog_digest;
        installed.files = files;
        reports.push(report);
    }

    storage::save_lock(lock)?;
    storage::audit(
        "update",
        serde_json::json!({"pattern": only, "count": reports.len()}),
    );
    Ok(reports)
}
