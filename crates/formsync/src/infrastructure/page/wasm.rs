//! Browser page backed by web-sys
//!
//! Elements are looked up on every call; nothing is cached between events.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement};

use crate::domain::{Display, Visibility};
use crate::ports::outbound::{PageError, PagePort};

#[derive(Debug, Clone, Copy, Default)]
pub struct WebPage;

impl WebPage {
    pub fn new() -> Self {
        Self
    }

    fn document() -> Result<Document, PageError> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| PageError::Unavailable("no document".to_string()))
    }

    fn element(id: &str) -> Result<Element, PageError> {
        Self::document()?
            .get_element_by_id(id)
            .ok_or_else(|| PageError::not_found(id))
    }

    fn html_element(id: &str) -> Result<HtmlElement, PageError> {
        Self::element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::wrong_kind(id, "HTML element"))
    }

    fn set_style(id: &str, property: &str, value: &str) -> Result<(), PageError> {
        Self::html_element(id)?
            .style()
            .set_property(property, value)
            .map_err(|e| PageError::Unavailable(format!("{:?}", e)))
    }
}

impl PagePort for WebPage {
    fn set_visibility(&self, id: &str, visibility: Visibility) -> Result<(), PageError> {
        Self::set_style(id, "visibility", visibility.as_css())
    }

    fn set_display(&self, id: &str, display: Display) -> Result<(), PageError> {
        Self::set_style(id, "display", display.as_css())
    }

    fn set_selected_index(&self, id: &str, index: usize) -> Result<(), PageError> {
        let select = Self::element(id)?
            .dyn_into::<HtmlSelectElement>()
            .map_err(|_| PageError::wrong_kind(id, "select element"))?;
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        select.set_selected_index(index);
        Ok(())
    }

    fn set_inner_html(&self, id: &str, markup: &str) -> Result<(), PageError> {
        Self::element(id)?.set_inner_html(markup);
        Ok(())
    }
}
