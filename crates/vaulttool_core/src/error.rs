use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a backlink query. Recoverable conditions (malformed
/// front matter, unreadable documents encountered mid-scan) never surface
/// here; they degrade to "contributes no backlinks".
#[derive(Debug, Error)]
pub enum BacklinkError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("target note not found: {0}")]
    TargetNotFound(PathBuf),
    #[error("vault root missing or not a directory: {0}")]
    VaultNotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
