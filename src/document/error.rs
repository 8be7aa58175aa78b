use std::fmt;

use crate::structure::error::StructureError;

#[derive(Debug)]
pub enum DocumentError {
    /// Document file could not be read
    Read { path: String, source: std::io::Error },

    /// Document content is not a valid form document
    Parse { context: String, source: serde_yaml::Error },

    /// The layout could not be built into a tree
    Structure(StructureError),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Read { path, source } => {
                write!(f, "Failed to read document '{}': {}", path, source)
            }
            DocumentError::Parse { context, source } => {
                write!(f, "Document parse error ({}): {}", context, source)
            }
            DocumentError::Structure(e) => {
                write!(f, "Invalid layout: {}", e)
            }
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Read { source, .. } => Some(source),
            DocumentError::Parse { source, .. } => Some(source),
            DocumentError::Structure(e) => Some(e),
        }
    }
}

impl From<StructureError> for DocumentError {
    fn from(e: StructureError) -> Self {
        DocumentError::Structure(e)
    }
}
