//! Bridge error types
//!
//! Handler errors mirror the cases where the page script would have aborted:
//! a missing element or a control outside any form. Network outcomes never
//! surface here; see `NotifyOutcome`.

use crate::ports::outbound::PageError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Control '{control}' does not belong to a form")]
    NoForm { control: String },
}

impl BridgeError {
    pub fn no_form(control: impl ToString) -> Self {
        Self::NoForm {
            control: control.to_string(),
        }
    }

    pub fn is_missing_element(&self) -> bool {
        matches!(self, Self::Page(PageError::ElementNotFound(_)))
    }
}
