use std::io;

/// Error type returned by [`DisplaySurface`] operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// No element with the requested identifier exists on the surface.
    #[error("display element `{id}` not found")]
    ElementNotFound {
        /// Identifier that was looked up.
        id: String,
    },
    /// The surface failed to present the text.
    #[error("failed to write display element `{id}`: {source}")]
    Write {
        /// Identifier of the element being written.
        id: String,
        #[source]
        source: io::Error,
    },
}

impl DisplayError {
    /// Helper for constructing [`DisplayError::ElementNotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}

/// A host surface holding text elements addressed by a stable identifier.
pub trait DisplaySurface: Send + Sync {
    /// Replace the text content of the element identified by `id`.
    ///
    /// # Errors
    ///
    /// [`DisplayError::ElementNotFound`] when the surface has no such element,
    /// [`DisplayError::Write`] when presenting the text failed.
    fn set_text(&self, id: &str, text: &str) -> Result<(), DisplayError>;
}
