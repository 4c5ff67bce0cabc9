//! In-memory page
//!
//! Holds just the element state the bridge reads and writes. Used by the
//! headless CLI and by tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{Display, PageLayout, Visibility};
use crate::ports::outbound::{PageError, PagePort};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub inner_html: String,
    /// `None` until something sets it (stylesheet default).
    pub display: Option<Display>,
    pub visibility: Visibility,
    pub selected_index: usize,
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: RwLock<HashMap<String, ElementState>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements = ids
            .into_iter()
            .map(|id| (id.into(), ElementState::default()))
            .collect();
        Self {
            elements: RwLock::new(elements),
        }
    }

    /// A page providing every element the layout names.
    pub fn for_layout(layout: &PageLayout) -> Self {
        Self::with_elements(layout.element_ids())
    }

    pub fn insert(&self, id: impl Into<String>) {
        match self.elements.write() {
            Ok(mut guard) => {
                guard.entry(id.into()).or_default();
            }
            Err(e) => tracing::error!("Failed to acquire write lock for page: {}", e),
        }
    }

    pub fn element(&self, id: &str) -> Option<ElementState> {
        self.elements.read().ok()?.get(id).cloned()
    }

    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.inner_html)
    }

    pub fn display(&self, id: &str) -> Option<Display> {
        self.element(id).and_then(|el| el.display)
    }

    pub fn visibility(&self, id: &str) -> Option<Visibility> {
        self.element(id).map(|el| el.visibility)
    }

    pub fn selected_index(&self, id: &str) -> Option<usize> {
        self.element(id).map(|el| el.selected_index)
    }

    /// Simulate the user picking an option.
    pub fn select_option(&self, id: &str, index: usize) -> Result<(), PageError> {
        self.update(id, |el| el.selected_index = index)
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut ElementState)) -> Result<(), PageError> {
        let mut guard = self
            .elements
            .write()
            .map_err(|e| PageError::Unavailable(e.to_string()))?;
        let element = guard.get_mut(id).ok_or_else(|| PageError::not_found(id))?;
        f(element);
        Ok(())
    }
}

impl PagePort for MemoryPage {
    fn set_visibility(&self, id: &str, visibility: Visibility) -> Result<(), PageError> {
        self.update(id, |el| el.visibility = visibility)
    }

    fn set_display(&self, id: &str, display: Display) -> Result<(), PageError> {
        self.update(id, |el| el.display = Some(display))
    }

    fn set_selected_index(&self, id: &str, index: usize) -> Result<(), PageError> {
        self.update(id, |el| el.selected_index = index)
    }

    fn set_inner_html(&self, id: &str, markup: &str) -> Result<(), PageError> {
        self.update(id, |el| el.inner_html = markup.to_string())
    }
}
