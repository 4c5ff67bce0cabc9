//! Outbound ports - Interfaces for the page and the network
//!
//! The bridge only talks to these traits, so the browser (web-sys, gloo-net)
//! and the native host (reqwest, in-memory page) plug in the same way.

pub mod http_client_port;
pub mod page_port;
pub mod task_spawner;

pub use http_client_port::{HttpClientPort, HttpReply, PostRequest, TransportError, HTTP_OK};
pub use page_port::{PageError, PagePort};
pub use task_spawner::{BoxedTask, TaskSpawner};

#[cfg(all(any(test, feature = "testing"), not(target_arch = "wasm32")))]
pub use http_client_port::MockHttpClientPort;
