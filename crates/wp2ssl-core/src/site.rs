//! Site model and per-run artifact naming.

use crate::error::{MigrationError, Result};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::PathBuf;

/// chrono format for run timestamps, e.g. `2024-01-02-1530`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M";

/// Name of the rewrite-rule file in the site root.
pub const REWRITE_FILE_NAME: &str = ".htaccess";

/// Site facts read once at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub root_directory: PathBuf,
    pub site_url: String,
}

impl SiteConfig {
    pub fn new(root_directory: impl Into<PathBuf>, site_url: impl Into<String>) -> Self {
        Self {
            root_directory: root_directory.into(),
            site_url: site_url.into(),
        }
    }

    pub fn rewrite_file_path(&self) -> PathBuf {
        self.root_directory.join(REWRITE_FILE_NAME)
    }

    /// True when the URL parses with an `https` scheme.
    pub fn is_https(&self) -> bool {
        url::Url::parse(&self.site_url)
            .map(|u| u.scheme() == "https")
            .unwrap_or(false)
    }

    /// Host component of the site URL.
    pub fn domain(&self) -> Result<String> {
        url::Url::parse(&self.site_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                MigrationError::Configuration(format!(
                    "could not determine host of site URL {}",
                    self.site_url
                ))
            })
    }
}

/// Format `at` as a run timestamp.
pub fn file_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Timestamp for a run started now, in local time.
pub fn now_timestamp() -> String {
    file_timestamp(&chrono::Local::now())
}

/// Replace a leading `http:` (any case) with `https:`; nothing else changes.
pub fn derive_new_url(old_url: &str) -> String {
    match old_url.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http:") => {
            format!("https:{}", &old_url[5..])
        }
        _ => old_url.to_string(),
    }
}

pub fn export_file_name(domain: &str, timestamp: &str) -> String {
    format!("{domain}-{timestamp}.sql")
}

pub fn archive_file_name(export_file_name: &str) -> String {
    format!("{export_file_name}.zip")
}

/// Names and URLs fixed for the duration of one migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRun {
    pub timestamp: String,
    pub export_file_name: String,
    pub archive_file_name: String,
    pub old_url: String,
    pub new_url: String,
}

impl MigrationRun {
    /// Build the run record. `export_name` overrides the derived
    /// `<domain>-<timestamp>.sql` name.
    pub fn new(site: &SiteConfig, timestamp: String, export_name: Option<&str>) -> Result<Self> {
        let export_file_name = match export_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => export_file_name(&site.domain()?, &timestamp),
        };
        Ok(Self {
            archive_file_name: archive_file_name(&export_file_name),
            export_file_name,
            old_url: site.site_url.clone(),
            new_url: derive_new_url(&site.site_url),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn new_url_replaces_scheme() {
        assert_eq!(derive_new_url("http://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn new_url_scheme_is_case_insensitive() {
        assert_eq!(derive_new_url("HTTP://x"), "https://x");
        assert_eq!(derive_new_url("HtTp://x"), "https://x");
    }

    #[test]
    fn new_url_only_touches_leading_scheme() {
        assert_eq!(derive_new_url("http://x/http-page"), "https://x/http-page");
        assert_eq!(derive_new_url("ftp://http:x"), "ftp://http:x");
    }

    #[test]
    fn new_url_short_or_non_ascii_input() {
        assert_eq!(derive_new_url("http"), "http");
        assert_eq!(derive_new_url(""), "");
        assert_eq!(derive_new_url("héllo://x"), "héllo://x");
    }

    #[test]
    fn timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 15, 30, 59).unwrap();
        assert_eq!(file_timestamp(&at), "2024-01-02-1530");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = plus_two.with_ymd_and_hms(2024, 12, 31, 9, 5, 0).unwrap();
        assert_eq!(file_timestamp(&at), "2024-12-31-0905");
    }

    #[test]
    fn export_and_archive_names() {
        let export = export_file_name("example.com", "2024-01-02-1530");
        assert_eq!(export, "example.com-2024-01-02-1530.sql");
        assert_eq!(archive_file_name(&export), "example.com-2024-01-02-1530.sql.zip");
    }

    #[test]
    fn domain_and_scheme() {
        let site = SiteConfig::new("/srv/www", "http://Example.com:8080/blog");
        assert_eq!(site.domain().unwrap(), "example.com");
        assert!(!site.is_https());
        assert!(SiteConfig::new("/", "HTTPS://example.com").is_https());
        assert!(SiteConfig::new("/", "not a url").domain().is_err());
    }

    #[test]
    fn run_shares_one_timestamp() {
        let site = SiteConfig::new("/srv/www", "http://site.test");
        let run = MigrationRun::new(&site, "2024-01-02-1530".into(), None).unwrap();
        assert_eq!(run.export_file_name, "site.test-2024-01-02-1530.sql");
        assert_eq!(run.archive_file_name, "site.test-2024-01-02-1530.sql.zip");
        assert_eq!(run.old_url, "http://site.test");
        assert_eq!(run.new_url, "https://site.test");
    }

    #[test]
    fn run_export_name_override() {
        let site = SiteConfig::new("/srv/www", "http://site.test");
        let run = MigrationRun::new(&site, "2024-01-02-1530".into(), Some("backup.sql")).unwrap();
        assert_eq!(run.export_file_name, "backup.sql");
        assert_eq!(run.archive_file_name, "backup.sql.zip");

        let blank = MigrationRun::new(&site, "2024-01-02-1530".into(), Some("  ")).unwrap();
        assert_eq!(blank.export_file_name, "site.test-2024-01-02-1530.sql");
    }
}
