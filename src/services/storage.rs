use crate::domain::models::{InstalledPattern, Lockfile, ProjectConfig};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "patkit.json";
pub const LOCK_FILE: &str = "patkit.lock";

/// Best-effort JSONL event log for mutating commands. Never fails the
/// command that emits it.
pub fn audit(action: &str, data: serde_json::Value) {
    let home = match std::env::var("HOME") {
        Ok(h) => h,
        Err(_) => return,
    };
    let path = PathBuf::from(home).join(".config/patkit/audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": chrono_like_now(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

fn chrono_like_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    ts.to_string()
}

pub fn upsert_installed(lock: &mut Lockfile, entry: InstalledPattern) {
    if let Some(existing) = lock.patterns.iter_mut().find(|i| i.name == entry.name) {
        *existing = entry;
    } else {
        lock.patterns.push(entry);
    }
}

pub fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

pub fn lock_path() -> PathBuf {
    PathBuf::from(LOCK_FILE)
}

pub fn load_config() -> anyhow::Result<Option<ProjectConfig>> {
    let p = config_path();
    if !p.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

pub fn save_config(c: &ProjectConfig) -> anyhow::Result<()> {
    std::fs::write(config_path(), serde_json::to_string_pretty(c)?)?;
    Ok(())
}

pub fn load_lock() -> anyhow::Result<Lockfile> {
    let p = lock_path();
    if !p.exists() {
        return Ok(Lockfile {
            version: 1,
            patterns: vec![],
        });
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_lock(lock: &Lockfile) -> anyhow::Result<()> {
    std::fs::write(lock_path(), serde_json::to_string_pretty(lock)?)?;
    Ok(())
}

/// Recursively copy a pattern bundle, replacing any previous copy. Returns
/// the relative paths that were written, sorted.
pub fn copy_bundle(src: &Path, dst: &Path) -> anyhow::Result<Vec<String>> {
    if dst.exists() {
        std::fs::remove_dir_all(dst)?;
    }
    std::fs::create_dir_all(dst)?;
    let mut files = Vec::new();
    copy_dir_all(src, dst, Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

fn copy_dir_all(
    src: &Path,
    dst: &Path,
    rel: &Path,
    files: &mut Vec<String>,
) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let to = dst.join(entry.file_name());
        let rel_child = rel.join(entry.file_name());
        if ty.is_dir() {
            std::fs::create_dir_all(&to)?;
            copy_dir_all(&entry.path(), &to, &rel_child, files)?;
        } else {
            std::fs::copy(entry.path(), to)?;
            files.push(rel_string(&rel_child));
        }
    }
    Ok(())
}

// Forward slashes keep digests and lockfiles identical across platforms.
fn rel_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Content digest of a bundle directory: SHA-256 over `relative-path NUL
/// bytes` per file, in sorted path order.
pub fn digest_dir(dir: &Path) -> anyhow::Result<String> {
    let mut entries = Vec::new();
    collect_files(dir, Path::new(""), &mut entries)?;
    entries.sort_by(|a, b| a.1.cmp(&b.1));

    let mut hasher = Sha256::new();
    for (path, rel) in entries {
        hasher.update(rel.as_bytes());
        hasher.update([0u8]);
        hasher.update(std::fs::read(path)?);
    }
    Ok(hex::encode(hasher.finalize()))
}

fn collect_files(
    dir: &Path,
    rel: &Path,
    out: &mut Vec<(PathBuf, String)>,
) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let rel_child = rel.join(entry.file_name());
        if ty.is_dir() {
            collect_files(&entry.path(), &rel_child, out)?;
        } else {
            out.push((entry.path(), rel_string(&rel_child)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_bundle_reports_relative_files_and_digest_is_stable() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("component.tsx"), "export const X = 1;\n").unwrap();
        std::fs::write(src.join("nested/schema.ts"), "export {};\n").unwrap();

        let dst = tmp.path().join("dst");
        let files = copy_bundle(&src, &dst).unwrap();
        assert_eq!(files, vec!["component.tsx", "nested/schema.ts"]);

        let d1 = digest_dir(&src).unwrap();
        let d2 = digest_dir(&dst).unwrap();
        assert_eq!(d1, d2);

        std::fs::write(dst.join("component.tsx"), "export const X = 2;\n").unwrap();
        assert_ne!(digest_dir(&dst).unwrap(), d1);
    }

    #[test]
    fn copy_bundle_replaces_previous_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("a.txt"), "a").unwrap();

        let dst = tmp.path().join("dst");
        std::fs::create_dir_all(&dst).unwrap();
        std::fs::write(dst.join("stale.txt"), "old").unwrap();

        copy_bundle(&src, &dst).unwrap();
        assert!(dst.join("a.txt").exists());
        assert!(!dst.join("stale.txt").exists());
    }
}
