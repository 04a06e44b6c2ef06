use thiserror::Error;

pub type Result<T, E = StlError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StlError {
    #[error("could not read mesh data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed STL: {0}")]
    MalformedMesh(String),
}
