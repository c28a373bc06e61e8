//! HTTP to HTTPS migration controller.
//!
//! Runs the fixed sequence precondition check → database export → archive →
//! URL search-replace → rewrite-rule file patch, stopping at the first failure.
//! Completed steps are never rolled back; the operator inspects and reruns.

mod state;


pub use state::MigrationState;

use std::path::PathBuf;

use crate::capability::{Capabilities, ReplaceOptions};
use crate::error::{MigrationError, Result, Step};
use crate::htaccess::{self, RewriteRuleFile};
use crate::report::Reporter;
use crate::site::{self, MigrationRun, SiteConfig};

/// Per-invocation knobs for [`MigrationController::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Export file name to use instead of `<domain>-<timestamp>.sql`.
    pub export_name: Option<String>,
    /// Prepend the forced-HTTPS block to `.htaccess` after the URL update.
    pub update_rewrite_file: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            export_name: None,
            update_rewrite_file: true,
        }
    }
}

pub struct MigrationController<'a> {
    root_directory: PathBuf,
    caps: Capabilities<'a>,
    reporter: &'a mut dyn Reporter,
    timestamp: Option<String>,
    site: Option<SiteConfig>,
    state: MigrationState,
}

impl<'a> MigrationController<'a> {
    pub fn new(
        root_directory: impl Into<PathBuf>,
        caps: Capabilities<'a>,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            root_directory: root_directory.into(),
            caps,
            reporter,
            timestamp: None,
            site: None,
            state: MigrationState::Start,
        }
    }

    /// Pin the run timestamp instead of reading the clock.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    /// Site facts captured by the last successful precondition check.
    pub fn site(&self) -> Option<&SiteConfig> {
        self.site.as_ref()
    }

    /// Check, in order: site URL present, root writable, site not yet HTTPS.
    /// Changes nothing on disk.
    pub fn verify_requirements(&mut self) -> Result<bool> {
        match self.check_requirements() {
            Ok(site) => {
                self.site = Some(site);
                self.state = MigrationState::PreconditionsOk;
                Ok(true)
            }
            Err(e) => Err(self.abort(e)),
        }
    }

    fn check_requirements(&self) -> Result<SiteConfig> {
        let site_url = self.caps.site.site_url().map_err(|e| {
            MigrationError::Configuration(format!("could not determine site URL: {e}"))
        })?;
        let site_url = site_url.trim();
        if site_url.is_empty() {
            return Err(MigrationError::Configuration(
                "could not determine site URL".to_string(),
            ));
        }
        if !dir_is_writable(&self.root_directory) {
            return Err(MigrationError::Permission(format!(
                "WordPress root folder {} is not writable",
                self.root_directory.display()
            )));
        }
        let site = SiteConfig::new(&self.root_directory, site_url);
        if site.is_https() {
            return Err(MigrationError::AlreadyMigrated(format!(
                "{} is already using HTTPS; nothing to migrate",
                site.site_url
            )));
        }
        Ok(site)
    }

    /// Run the full migration. Returns the run record on success.
    pub fn run(&mut self, options: &MigrateOptions) -> Result<MigrationRun> {
        self.verify_requirements()?;
        match self.run_steps(options) {
            Ok(run) => {
                tracing::info!(state = %self.state, new_url = %run.new_url, "migration finished");
                Ok(run)
            }
            Err(e) => Err(self.abort(e)),
        }
    }

    fn run_steps(&mut self, options: &MigrateOptions) -> Result<MigrationRun> {
        let site = self
            .site
            .clone()
            .ok_or_else(|| MigrationError::Configuration("site not verified".to_string()))?;
        let timestamp = self.timestamp.get_or_insert_with(site::now_timestamp).clone();
        let run = MigrationRun::new(&site, timestamp, options.export_name.as_deref())?;
        tracing::debug!(?run, "migration run prepared");

        self.export_database(&run)?;
        self.archive_export(&run)?;
        self.update_urls(&run)?;
        if options.update_rewrite_file {
            self.update_rewrite_file(&site, &run)?;
        } else {
            tracing::info!("skipping rewrite-rule file update");
        }
        Ok(run)
    }

    fn export_database(&mut self, run: &MigrationRun) -> Result<()> {
        let out = self.caps.exporter.export(&run.export_file_name)?;
        if !out.success() {
            tracing::warn!(code = out.return_code, stderr = %out.error_text(), "export failed");
            return Err(MigrationError::external(Step::Export, "Database export failed."));
        }
        self.reporter.success(&format!("Database exported to {}", run.export_file_name));
        self.state = MigrationState::Exported;
        Ok(())
    }

    fn archive_export(&mut self, run: &MigrationRun) -> Result<()> {
        let out = self
            .caps
            .archiver
            .archive(&run.archive_file_name, &run.export_file_name)?;
        if !out.success() {
            return Err(MigrationError::external(
                Step::Archive,
                out.failure_message("archive command"),
            ));
        }
        let basename = std::path::Path::new(&run.archive_file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| run.archive_file_name.clone());
        self.reporter.success(&format!("Exported database archived to {basename}"));
        self.state = MigrationState::Archived;
        Ok(())
    }

    fn update_urls(&mut self, run: &MigrationRun) -> Result<()> {
        let out = self.caps.replacer.search_replace(
            &run.old_url,
            &run.new_url,
            &ReplaceOptions::default(),
        )?;
        if !out.success() {
            tracing::warn!(
                code = out.return_code,
                stderr = %out.error_text(),
                "search-replace failed"
            );
            return Err(MigrationError::external(
                Step::SearchReplace,
                "Search and replace failed.",
            ));
        }
        self.reporter.success(&format!(
            "Updated database and replaced {} with {}",
            run.old_url, run.new_url
        ));
        self.state = MigrationState::UrlsUpdated;
        Ok(())
    }

    fn update_rewrite_file(&mut self, site: &SiteConfig, run: &MigrationRun) -> Result<()> {
        let file = RewriteRuleFile::in_root(&site.root_directory);
        self.ensure_rewrite_file_writable(&file)?;

        let existing = file.read()?;
        if htaccess::has_rule_block(&existing) {
            self.reporter.log(&format!(
                "HTTPS rewrite rules already present in {}; leaving it unchanged",
                file.path().display()
            ));
        } else {
            self.backup_rewrite_file(&file, &run.timestamp)?;
            file.write(&htaccess::prepend_rule_block(&existing))?;
            tracing::info!(path = %file.path().display(), "rewrite rules prepended");
            self.reporter.success(&format!(
                "Added HTTPS redirect rules to {}",
                file.path().display()
            ));
        }

        self.reporter.success(&format!("Your site is now served from {}", run.new_url));
        self.state = MigrationState::RewriteFileUpdated;
        Ok(())
    }

    /// Copy the rewrite-rule file to `<path>.<timestamp>` before it changes.
    ///
    /// A missing file needs no backup and a failed copy only warns. A file
    /// that exists but cannot be written is fatal, after telling the operator
    /// which rules to add by hand.
    pub fn backup_rewrite_file(&mut self, file: &RewriteRuleFile, timestamp: &str) -> Result<bool> {
        if !file.exists() {
            self.reporter.warning(&format!(
                "{} does not exist; it will be created",
                file.path().display()
            ));
            return Ok(true);
        }
        self.ensure_rewrite_file_writable(file)?;
        match file.backup(timestamp) {
            Ok(dest) => {
                let path = file.path().display();
                self.reporter.log(&format!("Backed up {path} to {}", dest.display()));
            }
            Err(e) => {
                let path = file.path().display();
                tracing::warn!(error = %e, %path, "rewrite file backup failed");
                self.reporter.warning(&format!(
                    "could not back up {path} ({e}); new rules will still be prepended"
                ));
            }
        }
        Ok(true)
    }

    /// An existing file must be writable; a missing one is created later.
    fn ensure_rewrite_file_writable(&mut self, file: &RewriteRuleFile) -> Result<()> {
        if !file.exists() || file.is_writable() {
            return Ok(());
        }
        self.reporter.warning(&htaccess::manual_instructions(file.path()));
        Err(MigrationError::Permission(format!(
            "could not write to rewrite-rule file {}",
            file.path().display()
        )))
    }

    fn abort(&mut self, err: MigrationError) -> MigrationError {
        tracing::error!(code = err.code(), reached = %self.state, "migration aborted: {err}");
        self.state = MigrationState::Aborted;
        err
    }
}

/// Writable means a scratch file can be created (and dropped) inside `dir`.
fn dir_is_writable(dir: &std::path::Path) -> bool {
    tempfile::Builder::new()
        .prefix(".wp2ssl-write-check")
        .tempfile_in(dir)
        .is_ok()
}
