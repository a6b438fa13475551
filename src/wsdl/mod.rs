//! Interface-description (WSDL) documents.
//!
//! Documents are registered in the registry under a name `X` and served at
//! `X.wsdl`. Their content is opaque here; only `location` attributes are
//! touched, and only when location transformation is enabled.

pub mod transform;

use std::path::Path;
use std::time::SystemTime;

use crate::error::ProcessingResult;

/// A servable interface description.
pub trait WsdlDefinition: Send + Sync {
    /// Document text.
    fn source(&self) -> ProcessingResult<String>;

    /// Modification time, or `None` when unknown (treated as always modified).
    fn last_modified(&self) -> Option<SystemTime> {
        None
    }
}

/// A WSDL document held in memory.
#[derive(Debug, Clone)]
pub struct SimpleWsdlDefinition {
    source: String,
    last_modified: Option<SystemTime>,
}

impl SimpleWsdlDefinition {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, last_modified: SystemTime) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Read a document from disk, taking the file's modification time as timestamp.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let last_modified = std::fs::metadata(path)?.modified().ok();
        Ok(Self {
            source,
            last_modified,
        })
    }
}

impl WsdlDefinition for SimpleWsdlDefinition {
    fn source(&self) -> ProcessingResult<String> {
        Ok(self.source.clone())
    }

    fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_in_memory_definition() {
        let definition = SimpleWsdlDefinition::new("<definitions/>");
        assert_eq!(definition.source().unwrap(), "<definitions/>");
        assert!(definition.last_modified().is_none());

        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let definition = definition.with_last_modified(stamp);
        assert_eq!(definition.last_modified(), Some(stamp));
    }

    #[test]
    fn test_from_file_uses_mtime() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<definitions name=\"echo\"/>").unwrap();

        let definition = SimpleWsdlDefinition::from_file(file.path()).unwrap();
        assert_eq!(definition.source().unwrap(), "<definitions name=\"echo\"/>");
        assert!(definition.last_modified().is_some());
    }

    #[test]
    fn test_from_missing_file() {
        let err = SimpleWsdlDefinition::from_file(Path::new("/definitely/not/here.wsdl")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
