pub mod config;
pub mod logging;

pub mod capability;
pub mod error;
pub mod htaccess;
pub mod migration;
pub mod report;
pub mod site;
pub mod wp_cli;
