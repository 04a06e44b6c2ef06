use printquote_stl::StlError;
use thiserror::Error;

use crate::upload::{MeshKind, MAX_UPLOAD_BYTES};

/// Reasons a quote request is refused. None of them produce a partial quotation.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("{file}: {}", .kind.rejection())]
    UnsupportedFormat { file: String, kind: MeshKind },

    #[error(
        "{file}: file size exceeds maximum allowed size of {}MB",
        MAX_UPLOAD_BYTES / 1024 / 1024
    )]
    FileTooLarge { file: String, size: usize },

    #[error("No file uploaded")]
    NoFiles,

    #[error("Some files did not upload ({received} of {expected} received). Please try again.")]
    FileCountMismatch { expected: usize, received: usize },

    #[error("{file}: could not read file: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {reason}")]
    MalformedMesh { file: String, reason: String },

    #[error("{files:?}: weight or price is too large to quote")]
    PriceOutOfRange { files: Vec<String> },

    #[error("invalid print settings: {0}")]
    InvalidSettings(String),

    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("could not parse material catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

impl QuoteError {
    pub(crate) fn from_stl(file: &str, err: StlError) -> Self {
        let file = file.to_string();
        match err {
            StlError::Io(source) => QuoteError::Io { file, source },
            StlError::MalformedMesh(reason) => QuoteError::MalformedMesh { file, reason },
        }
    }
}
