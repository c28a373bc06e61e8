//! The Apache rewrite-rule file (`.htaccess`) and the forced-HTTPS block.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::site::REWRITE_FILE_NAME;

pub const BEGIN_MARKER: &str = "# BEGIN wp2ssl";
pub const END_MARKER: &str = "# END wp2ssl";

/// Block prepended to the rewrite-rule file. Carries no trailing newline; the
/// writer adds exactly one before the previous content.
pub const RULE_BLOCK: &str = "# BEGIN wp2ssl
<IfModule mod_rewrite.c>
RewriteEngine On
RewriteCond %{HTTPS} off
RewriteRule ^(.*)$ https://%{HTTP_HOST}%{REQUEST_URI} [L,R=301]
</IfModule>
# END wp2ssl";

/// Handle on a site's rewrite-rule file.
#[derive(Debug, Clone)]
pub struct RewriteRuleFile {
    path: PathBuf,
}

impl RewriteRuleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(REWRITE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Opening for append does not touch the content.
    pub fn is_writable(&self) -> bool {
        fs::OpenOptions::new().append(true).open(&self.path).is_ok()
    }

    /// `<path>.<timestamp>`
    pub fn backup_path(&self, timestamp: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".");
        name.push(timestamp);
        PathBuf::from(name)
    }

    /// Copy the current file next to itself; returns the backup path.
    pub fn backup(&self, timestamp: &str) -> io::Result<PathBuf> {
        let dest = self.backup_path(timestamp);
        fs::copy(&self.path, &dest)?;
        Ok(dest)
    }

    /// Raw content, or empty when the file does not exist.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub fn write(&self, content: &[u8]) -> io::Result<()> {
        fs::write(&self.path, content)
    }
}

/// True if `content` already carries a line with the begin marker.
pub fn has_rule_block(content: &[u8]) -> bool {
    String::from_utf8_lossy(content)
        .lines()
        .any(|line| line.trim() == BEGIN_MARKER)
}

/// Rule block, one newline, then `existing` byte-for-byte.
pub fn prepend_rule_block(existing: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(RULE_BLOCK.len() + 1 + existing.len());
    out.extend_from_slice(RULE_BLOCK.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(existing);
    out
}

/// Operator instructions when the file cannot be written.
pub fn manual_instructions(path: &Path) -> String {
    format!(
        "could not write to {}. Add the following rules at the top of it manually:\n\n{}\n",
        path.display(),
        RULE_BLOCK
    )
}
