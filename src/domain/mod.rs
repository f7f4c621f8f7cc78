//! Domain types shared across commands and services.
//!
//! ## Files
//! - `models.rs` — project config, lockfile, and command report structs.
//! - `compliance.rs` — compliance records, status buckets, aggregation.
//!
//! ## Conventions
//! - Everything here is plain data plus pure functions.
//! - On-disk JSON uses the field names consumers see; structs carry the
//!   serde renames, not the call sites.

pub mod compliance;
pub mod models;
