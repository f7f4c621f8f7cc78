use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Consumer project config, written by `init` as `patkit.json`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub patterns_dir: String,
    pub theme_file: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InstalledPattern {
    pub name: String,
    pub catalog: String,
    pub source: String,
    pub version: Option<String>,
    pub digest: String,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Lockfile {
    pub version: u32,
    #[serde(default)]
    pub patterns: Vec<InstalledPattern>,
}

#[derive(Serialize)]
pub struct InitReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Serialize)]
pub struct UpdateReport {
    pub name: String,
    pub status: String,
    pub old_version: Option<String>,
    pub new_version: Option<String>,
}
