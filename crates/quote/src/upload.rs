use std::path::Path;

use crate::QuoteError;

/// Largest mesh accepted per file.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Mesh format, going by the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Stl,
    /// Accepted by the upload form but not priced yet.
    Obj,
    Other,
}

impl MeshKind {
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("stl") => MeshKind::Stl,
            Some("obj") => MeshKind::Obj,
            _ => MeshKind::Other,
        }
    }

    /// The message shown to a customer whose file cannot be priced.
    pub fn rejection(&self) -> &'static str {
        match self {
            MeshKind::Stl => "STL files are supported",
            MeshKind::Obj => "OBJ volume calculation is not supported yet. Please upload STL.",
            MeshKind::Other => "Invalid file type. Only .stl files are supported.",
        }
    }
}

/// One uploaded mesh file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MeshUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a mesh from disk, named after the file's own name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = printquote_stl::read_stl_file(path).map_err(|e| QuoteError::from_stl(&name, e))?;
        Ok(Self { name, bytes })
    }

    pub fn kind(&self) -> MeshKind {
        MeshKind::from_file_name(&self.name)
    }

    /// Rejects anything that is not an STL within the size limit.
    pub fn check(&self) -> Result<(), QuoteError> {
        match self.kind() {
            MeshKind::Stl => (),
            kind => {
                return Err(QuoteError::UnsupportedFormat {
                    file: self.name.clone(),
                    kind,
                })
            }
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(QuoteError::FileTooLarge {
                file: self.name.clone(),
                size: self.bytes.len(),
            });
        }
        Ok(())
    }
}

/// Checks the batch as a whole before any file is decoded.
///
/// `expected` is the file count the client claims to have sent, when it says.
pub fn check_batch(uploads: &[MeshUpload], expected: Option<usize>) -> Result<(), QuoteError> {
    if let Some(expected) = expected.filter(|n| *n > 0) {
        if uploads.len() != expected {
            return Err(QuoteError::FileCountMismatch {
                expected,
                received: uploads.len(),
            });
        }
    }
    if uploads.is_empty() {
        return Err(QuoteError::NoFiles);
    }
    for upload in uploads {
        upload.check()?;
    }
    Ok(())
}
