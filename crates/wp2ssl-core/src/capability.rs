//! Interfaces to the external collaborators of a migration.
//!
//! The controller only depends on these traits and does not know how the
//! database is exported or searched. [`crate::wp_cli::WpCli`] implements all
//! of them on top of WP-CLI and `zip`.

use crate::error::Result;

/// Captured result of an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failed(return_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            return_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.return_code == 0
    }

    /// Text describing a failure: stderr, or stdout when stderr is empty.
    pub fn error_text(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }

    /// [`Self::error_text`], or `<what> exited with code N` when both streams are empty.
    pub fn failure_message(&self, what: &str) -> String {
        match self.error_text() {
            "" => format!("{what} exited with code {}", self.return_code),
            text => text.to_string(),
        }
    }
}

/// Matching options for a database search-replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Force the PHP-side replacement so serialized values stay intact.
    pub precise: bool,
    pub verbose: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            precise: true,
            verbose: true,
        }
    }
}

/// Read-only access to the site's stored base URL.
pub trait SiteConfigStore {
    fn site_url(&self) -> Result<String>;
}

pub trait Exporter {
    /// Export the database to `target` (relative to the site root).
    fn export(&self, target: &str) -> Result<CommandOutput>;
}

pub trait Archiver {
    /// Compress `file` into `archive`.
    fn archive(&self, archive: &str, file: &str) -> Result<CommandOutput>;
}

pub trait Replacer {
    /// Replace every occurrence of `old` with `new` across the database.
    fn search_replace(
        &self,
        old: &str,
        new: &str,
        options: &ReplaceOptions,
    ) -> Result<CommandOutput>;
}

/// The set of collaborators one migration runs against.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub site: &'a dyn SiteConfigStore,
    pub exporter: &'a dyn Exporter,
    pub archiver: &'a dyn Archiver,
    pub replacer: &'a dyn Replacer,
}

impl<'a> Capabilities<'a> {
    /// Use one value for every capability.
    pub fn all<T>(backend: &'a T) -> Self
    where
        T: SiteConfigStore + Exporter + Archiver + Replacer,
    {
        Self {
            site: backend,
            exporter: backend,
            archiver: backend,
            replacer: backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_prefers_stderr() {
        let out = CommandOutput {
            return_code: 12,
            stdout: "zip warning: name not matched\n".into(),
            stderr: "zip error: Nothing to do!\n".into(),
        };
        assert!(!out.success());
        assert_eq!(out.error_text(), "zip error: Nothing to do!");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let out = CommandOutput {
            return_code: 1,
            stdout: "only stdout\n".into(),
            stderr: "  \n".into(),
        };
        assert_eq!(out.error_text(), "only stdout");
    }

    #[test]
    fn failure_message_without_output_names_exit_code() {
        let silent = CommandOutput::failed(18, "");
        assert_eq!(
            silent.failure_message("archive command"),
            "archive command exited with code 18"
        );
        let noisy = CommandOutput::failed(12, "zip error: Nothing to do!\n");
        assert_eq!(noisy.failure_message("archive command"), "zip error: Nothing to do!");
    }

    #[test]
    fn replace_options_default_precise_and_verbose() {
        let opts = ReplaceOptions::default();
        assert!(opts.precise);
        assert!(opts.verbose);
    }
}
