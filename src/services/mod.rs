//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `installer.rs` — add/update flows against the catalog.
//! - `storage.rs` — project config/lock persistence, bundle copy + digest,
//!   audit log.
//! - `theme.rs` — theme token file generation.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod installer;
pub mod output;
pub mod storage;
pub mod theme;
