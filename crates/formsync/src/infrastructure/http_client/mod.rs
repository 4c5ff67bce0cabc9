//! HTTP client adapters
//!
//! The correct client is selected at compile time based on the target architecture.

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::ReqwestHttpClient;

#[cfg(target_arch = "wasm32")]
pub use wasm::GlooHttpClient;
