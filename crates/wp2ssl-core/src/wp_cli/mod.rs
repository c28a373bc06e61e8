//! WP-CLI and `zip` backed capabilities.
//!
//! Each capability is one blocking child process run from the site root:
//!
//! - site URL: `wp option get siteurl`
//! - export: `wp db export <file>`
//! - archive: `zip <archive> <file>`
//! - search-replace: `wp search-replace <old> <new> --precise --verbose`

mod command;

pub use command::ExternalCommand;

use std::path::PathBuf;

use crate::capability::{
    Archiver, CommandOutput, Exporter, ReplaceOptions, Replacer, SiteConfigStore,
};
use crate::config::Wp2sslConfig;
use crate::error::{MigrationError, Result, Step};

#[derive(Debug, Clone)]
pub struct WpCli {
    wp_binary: String,
    zip_binary: String,
    wp_path: Option<PathBuf>,
    cwd: PathBuf,
}

impl WpCli {
    /// Commands run from `site_root` (see [`Wp2sslConfig::site_root`]). When
    /// `wp_path` is configured, WP-CLI also gets `--path=<site_root>`.
    pub fn new(cfg: &Wp2sslConfig, site_root: impl Into<PathBuf>) -> Self {
        let cwd = site_root.into();
        Self {
            wp_binary: cfg.wp_binary.clone(),
            zip_binary: cfg.zip_binary.clone(),
            wp_path: cfg.wp_path.as_ref().map(|_| cwd.clone()),
            cwd,
        }
    }

    /// `wp` invocation with the global `--path` flag when configured.
    fn wp(&self) -> ExternalCommand {
        let cmd = ExternalCommand::new(&self.wp_binary).cwd(&self.cwd);
        match self.wp_path {
            Some(ref path) => cmd.arg(format!("--path={}", path.display())),
            None => cmd,
        }
    }

    pub fn site_url_command(&self) -> ExternalCommand {
        self.wp().args(["option", "get", "siteurl"])
    }

    pub fn export_command(&self, target: &str) -> ExternalCommand {
        self.wp().args(["db", "export", target])
    }

    pub fn archive_command(&self, archive: &str, file: &str) -> ExternalCommand {
        ExternalCommand::new(&self.zip_binary)
            .cwd(&self.cwd)
            .args([archive, file])
    }

    pub fn search_replace_command(
        &self,
        old: &str,
        new: &str,
        options: &ReplaceOptions,
    ) -> ExternalCommand {
        let mut cmd = self.wp().args(["search-replace", old, new]);
        if options.precise {
            cmd = cmd.arg("--precise");
        }
        if options.verbose {
            cmd = cmd.arg("--verbose");
        }
        cmd
    }
}

impl SiteConfigStore for WpCli {
    fn site_url(&self) -> Result<String> {
        let out = self.site_url_command().run_capture(Step::SiteUrl)?;
        if !out.success() {
            return Err(MigrationError::external(Step::SiteUrl, out.error_text()));
        }
        Ok(out.stdout.trim().to_string())
    }
}

impl Exporter for WpCli {
    fn export(&self, target: &str) -> Result<CommandOutput> {
        self.export_command(target).run_capture(Step::Export)
    }
}

impl Archiver for WpCli {
    fn archive(&self, archive: &str, file: &str) -> Result<CommandOutput> {
        self.archive_command(archive, file).run_capture(Step::Archive)
    }
}

impl Replacer for WpCli {
    fn search_replace(
        &self,
        old: &str,
        new: &str,
        options: &ReplaceOptions,
    ) -> Result<CommandOutput> {
        self.search_replace_command(old, new, options)
            .run_capture(Step::SearchReplace)
    }
}
