use clap::{Parser, Subcommand};

pub const DEFAULT_CATALOG_SOURCE: &str = "../catalog";
pub const DEFAULT_PATTERNS_DIR: &str = "patterns";
pub const DEFAULT_THEME_FILE: &str = "theme.config.ts";

#[derive(Parser, Debug)]
#[command(name = "patkit", version, about = "Pattern catalog CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_CATALOG_SOURCE,
        help = "Catalog source (dir containing .patkit/catalog.json, or a catalog.json path)"
    )]
    pub catalog: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a project: patterns dir, theme token file, config, lockfile
    Init {
        #[arg(long = "dir", default_value = DEFAULT_PATTERNS_DIR)]
        patterns_dir: String,
        #[arg(long = "theme", default_value = DEFAULT_THEME_FILE)]
        theme_file: String,
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Copy a pattern bundle from the catalog into the project
    Add {
        pattern: String,
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Re-copy installed patterns that changed in the catalog
    Update { pattern: Option<String> },
    /// List installed patterns from the lockfile
    List,
    /// Search the catalog by name, description, or tag
    Search { query: Option<String> },
    /// Show one catalog pattern in detail
    Info { pattern: String },
    /// Check the catalog manifest for duplicate or broken entries
    Validate,
    /// Compliance report over a patterns directory
    Audit {
        #[arg(long, default_value_t = false)]
        verbose: bool,
        #[arg(long = "patterns")]
        patterns_dir: Option<String>,
    },
}
