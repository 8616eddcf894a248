//! Renderer errors
//!
//! Missing assets (header image, fonts) are deliberately NOT errors: the
//! renderer degrades to the default layout and builtin fonts instead of
//! failing the whole operation. Only document assembly and I/O failures
//! surface here.

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur while rendering a document
#[derive(Debug, Error)]
pub enum RenderError {
    /// PDF assembly failed
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// Writing the document to disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Arithmetic error while computing per-line amounts
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),
}

impl RenderError {
    /// Wraps any printable PDF-layer error
    pub fn pdf(error: impl std::fmt::Display) -> Self {
        RenderError::Pdf(error.to_string())
    }
}
