//! Page adapters

#[cfg(target_arch = "wasm32")]
mod wasm;

pub mod memory;

pub use memory::{ElementState, MemoryPage};

#[cfg(target_arch = "wasm32")]
pub use wasm::WebPage;
