//! Output formatting module
//!
//! Renders team access bindings as table, CSV, JSON or YAML.

mod common;
mod team_access;

pub use team_access::{output_team_access, output_team_access_list};
