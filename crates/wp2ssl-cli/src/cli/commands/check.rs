//! `wp2ssl check` – precondition checks without touching anything.

use anyhow::{Context, Result};
use std::path::Path;
use wp2ssl_core::capability::Capabilities;
use wp2ssl_core::config::Wp2sslConfig;
use wp2ssl_core::migration::MigrationController;
use wp2ssl_core::site;
use wp2ssl_core::wp_cli::WpCli;

use crate::cli::console::ConsoleReporter;

pub fn run_check(cfg: &Wp2sslConfig, root: &Path) -> Result<()> {
    let wp = WpCli::new(cfg, root);
    let mut reporter = ConsoleReporter;

    let mut controller = MigrationController::new(root, Capabilities::all(&wp), &mut reporter);
    controller.verify_requirements()?;
    let site = controller
        .site()
        .context("precondition check returned no site")?;

    println!("Site URL:  {}", site.site_url);
    println!("New URL:   {}", site::derive_new_url(&site.site_url));
    println!("Root:      {}", site.root_directory.display());
    println!("Rules in:  {}", site.rewrite_file_path().display());
    println!("Ready to migrate.");
    Ok(())
}
