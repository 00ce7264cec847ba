use chrono::NaiveDateTime;

/// Error type returned by [`DateTimeFormatter`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The pattern cannot be rendered for a local timestamp.
    #[error("clock format `{pattern}` cannot render {at}")]
    Unrenderable { pattern: String, at: NaiveDateTime },
}

/// Renders a timestamp into the text shown on the display surface.
pub trait DateTimeFormatter: Send + Sync {
    /// # Errors
    ///
    /// [`FormatError::Unrenderable`] when the timestamp cannot be rendered;
    /// no partial text is returned.
    fn format(&self, at: &NaiveDateTime) -> Result<String, FormatError>;
}
