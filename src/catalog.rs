use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Catalog {
    pub name: String,
    pub owner: Owner,
    pub patterns: Vec<Pattern>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Owner {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Pattern {
    pub name: String,
    pub source: String,
    pub description: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("pattern not found: {0}")]
    PatternNotFound(String),
    #[error("duplicate pattern name: {0}")]
    DuplicatePattern(String),
    #[error("pattern source missing on disk: {0}")]
    SourceMissing(String),
    #[error("pattern source escapes catalog root: {0}")]
    SourceEscapesRoot(String),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::PatternNotFound(_) => "PATTERN_NOT_FOUND",
            CatalogError::DuplicatePattern(_) => "DUPLICATE_PATTERN",
            CatalogError::SourceMissing(_) => "PATTERN_SOURCE_MISSING",
            CatalogError::SourceEscapesRoot(_) => "PATTERN_SOURCE_ESCAPES",
        }
    }
}

/// A catalog source is either the catalog directory itself or a direct path
/// to a manifest file.
pub fn resolve_catalog_file(source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_dir() {
        p.join(".patkit").join("catalog.json")
    } else {
        p.to_path_buf()
    }
}

/// Catalog root is the directory pattern sources are resolved against.
pub fn resolve_catalog_root(source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_dir() {
        p.to_path_buf()
    } else {
        // manifest lives in <root>/.patkit/catalog.json
        p.parent()
            .and_then(|d| d.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn load_catalog(source: &str) -> anyhow::Result<Catalog> {
    let file = resolve_catalog_file(source);
    let raw = std::fs::read_to_string(&file)
        .map_err(|e| anyhow::anyhow!("cannot read catalog manifest {}: {}", file.display(), e))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Resolve a pattern's bundle directory under the catalog root, refusing
/// sources that point outside it.
pub fn resolve_pattern_path(catalog_source: &str, pattern: &Pattern) -> anyhow::Result<PathBuf> {
    let root = resolve_catalog_root(catalog_source);
    let rel = Path::new(&pattern.source);
    // `root.join` discards the root entirely for absolute paths
    if rel.is_absolute()
        || rel
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(CatalogError::SourceEscapesRoot(pattern.source.clone()).into());
    }
    let path = root.join(rel);
    if !path.is_dir() {
        return Err(CatalogError::SourceMissing(pattern.source.clone()).into());
    }
    Ok(path)
}

pub fn search<'a>(c: &'a Catalog, query: Option<&str>) -> Vec<&'a Pattern> {
    match query {
        None => c.patterns.iter().collect(),
        Some(q) => {
            let q = q.to_ascii_lowercase();
            c.patterns
                .iter()
                .filter(|p| {
                    p.name.to_ascii_lowercase().contains(&q)
                        || p.description
                            .as_ref()
                            .map(|d| d.to_ascii_lowercase().contains(&q))
                            .unwrap_or(false)
                        || p.tags.iter().any(|t| t.to_ascii_lowercase().contains(&q))
                })
                .collect()
        }
    }
}

pub fn find<'a>(c: &'a Catalog, name: &str) -> anyhow::Result<&'a Pattern> {
    c.patterns
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| CatalogError::PatternNotFound(name.to_string()).into())
}

pub fn validate(c: &Catalog, catalog_source: &str) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for p in &c.patterns {
        if !seen.insert(&p.name) {
            return Err(CatalogError::DuplicatePattern(p.name.clone()).into());
        }
        resolve_pattern_path(catalog_source, p)?;
    }
    Ok(())
}
