//! Infrastructure adapters
//!
//! Native builds talk HTTP through reqwest and keep the page in memory;
//! wasm32 builds drive the real DOM with web-sys and fetch with gloo-net.

pub mod config;
pub mod http_client;
pub mod page;
pub mod spawner;

#[cfg(all(any(test, feature = "testing"), not(target_arch = "wasm32")))]
pub mod testing;
