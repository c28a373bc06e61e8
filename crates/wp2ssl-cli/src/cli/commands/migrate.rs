//! `wp2ssl migrate [name]` – run the full HTTP to HTTPS migration.

use anyhow::Result;
use std::path::Path;
use wp2ssl_core::capability::Capabilities;
use wp2ssl_core::config::Wp2sslConfig;
use wp2ssl_core::migration::{MigrateOptions, MigrationController};
use wp2ssl_core::wp_cli::WpCli;

use crate::cli::console::ConsoleReporter;

pub fn run_migrate(
    cfg: &Wp2sslConfig,
    root: &Path,
    name: Option<String>,
    skip_htaccess: bool,
) -> Result<()> {
    let options = migrate_options(cfg, name, skip_htaccess);
    let wp = WpCli::new(cfg, root);
    let mut reporter = ConsoleReporter;

    let mut controller = MigrationController::new(root, Capabilities::all(&wp), &mut reporter);
    let run = controller.run(&options)?;
    tracing::info!(
        export = %run.export_file_name,
        archive = %run.archive_file_name,
        "migrated {} -> {}",
        run.old_url,
        run.new_url
    );
    Ok(())
}

/// CLI flag wins over the config file for the `.htaccess` step.
pub(crate) fn migrate_options(
    cfg: &Wp2sslConfig,
    name: Option<String>,
    skip_htaccess: bool,
) -> MigrateOptions {
    MigrateOptions {
        export_name: name,
        update_rewrite_file: cfg.update_htaccess && !skip_htaccess,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_flag_and_config_both_disable_rewrite() {
        let cfg = Wp2sslConfig::default();
        assert!(migrate_options(&cfg, None, false).update_rewrite_file);
        assert!(!migrate_options(&cfg, None, true).update_rewrite_file);

        let off = Wp2sslConfig {
            update_htaccess: false,
            ..Wp2sslConfig::default()
        };
        assert!(!migrate_options(&off, None, false).update_rewrite_file);
    }

    #[test]
    fn name_is_forwarded() {
        let opts = migrate_options(&Wp2sslConfig::default(), Some("pre.sql".into()), false);
        assert_eq!(opts.export_name.as_deref(), Some("pre.sql"));
    }
}
