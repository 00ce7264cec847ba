use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use clockface_proto::ports::{DisplayError, DisplaySurface};

/// In-memory page of text elements addressed by identifier.
///
/// Writes only replace the text of elements that already exist; the document
/// never creates elements on its own.
#[derive(Debug, Default)]
pub struct Document {
    elements: Mutex<HashMap<String, String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document holding one empty element per identifier.
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements = ids
            .into_iter()
            .map(|id| (id.into(), String::new()))
            .collect();

        Self {
            elements: Mutex::new(elements),
        }
    }

    /// Add an empty element. An existing element keeps its text.
    pub fn insert_element(&self, id: impl Into<String>) {
        self.elements().entry(id.into()).or_default();
    }

    /// Remove an element, returning its last text.
    pub fn remove_element(&self, id: &str) -> Option<String> {
        self.elements().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements().contains_key(id)
    }

    /// Current text of an element, `None` when it does not exist.
    pub fn text(&self, id: &str) -> Option<String> {
        self.elements().get(id).cloned()
    }

    fn elements(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // element text stays consistent even if a writer panicked mid-call
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplaySurface for Document {
    fn set_text(&self, id: &str, text: &str) -> Result<(), DisplayError> {
        let mut elements = self.elements();
        let element = elements.get_mut(id).ok_or_else(|| DisplayError::not_found(id))?;

        element.clear();
        element.push_str(text);
        Ok(())
    }
}
