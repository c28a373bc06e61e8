//! CLI command handlers, one per file.

mod check;
mod migrate;
mod show_rules;

pub use check::run_check;
pub use migrate::run_migrate;
pub use show_rules::run_show_rules;
