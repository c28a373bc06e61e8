//! Progress of a single migration run.

use std::fmt;

/// Furthest point a run reached. No state is revisited; any failure moves to
/// [`MigrationState::Aborted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MigrationState {
    #[default]
    Start,
    PreconditionsOk,
    Exported,
    Archived,
    UrlsUpdated,
    RewriteFileUpdated,
    Aborted,
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::PreconditionsOk => "preconditions_ok",
            Self::Exported => "exported",
            Self::Archived => "archived",
            Self::UrlsUpdated => "urls_updated",
            Self::RewriteFileUpdated => "rewrite_file_updated",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}
