//! Error types for the sumreport library.
//!
//! Parsing never fails; errors only come from rendering and export.

use std::io;
use thiserror::Error;

/// Result type alias for sumreport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or exporting a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error building the PDF structure.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// An embedded font could not be read.
    #[error("Font error: {0}")]
    Font(String),

    /// Error during rendering (HTML, Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The exported file could not be put in place.
    #[error("Export failed: {0}")]
    Export(String),

    /// An option value was not recognized or cannot be used.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Export(err.error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOption("page size 'tabloid'".into());
        assert_eq!(err.to_string(), "Invalid option: page size 'tabloid'");

        let err = Error::Export("permission denied".into());
        assert_eq!(err.to_string(), "Export failed: permission denied");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
