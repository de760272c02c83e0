//! Content pipeline error types.
//!
//! Every variant is terminal for the request that raised it; the serve layer
//! maps each to a machine-readable code plus a human message.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, decoding, mutating or persisting a post.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("url `{0}` is not under the configured site url")]
    InvalidUrl(String),

    #[error("missing front matter delimiters")]
    MalformedFrontMatter,

    #[error("front matter is not valid yaml")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("cannot read source file `{0}`")]
    SourceRead(PathBuf, #[source] std::io::Error),

    #[error("the content directory `{0}` could not be created")]
    DirectoryCreateFailed(PathBuf, #[source] std::io::Error),

    #[error("the file `{0}` already exists")]
    FileConflict(PathBuf),

    #[error("unable to write `{0}`")]
    FileWriteFailed(PathBuf, #[source] std::io::Error),

    #[error("unable to delete the rendered file `{0}`")]
    UnlinkFailed(PathBuf, #[source] std::io::Error),
}

impl ContentError {
    /// Machine-readable code carried in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::MalformedFrontMatter | Self::FrontMatter(_) => "malformed_document",
            Self::SourceRead(..) => "source_error",
            Self::DirectoryCreateFailed(..) => "cannot_mkdir",
            Self::FileConflict(_) => "file_conflict",
            Self::FileWriteFailed(..) => "file_error",
            Self::UnlinkFailed(..) => "unlink_failed",
        }
    }
}
