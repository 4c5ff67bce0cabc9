//! Page Port - the slice of the DOM the bridge touches

use crate::domain::{Display, Visibility};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Element not found: #{0}")]
    ElementNotFound(String),

    #[error("Element #{id} is not a {expected}")]
    WrongKind { id: String, expected: &'static str },

    #[error("Page unavailable: {0}")]
    Unavailable(String),
}

impl PageError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::ElementNotFound(id.to_string())
    }

    pub fn wrong_kind(id: impl ToString, expected: &'static str) -> Self {
        Self::WrongKind {
            id: id.to_string(),
            expected,
        }
    }
}

/// Element operations addressed by id.
pub trait PagePort: Send + Sync {
    fn set_visibility(&self, id: &str, visibility: Visibility) -> Result<(), PageError>;

    fn set_display(&self, id: &str, display: Display) -> Result<(), PageError>;

    fn set_selected_index(&self, id: &str, index: usize) -> Result<(), PageError>;

    /// Replace the element's content with unescaped markup.
    fn set_inner_html(&self, id: &str, markup: &str) -> Result<(), PageError>;
}
