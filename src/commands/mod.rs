//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `project.rs` — init/add/update/list/search/info/validate.
//! - `audit.rs` — compliance report assembly and rendering.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*` and `domain/*`.
//! - Keep behavior and output schema stable.

pub mod audit;
pub mod project;

pub use audit::handle_audit;
pub use project::handle_project_commands;
