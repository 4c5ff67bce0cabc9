//! Task spawners for fire-and-forget notifications

use crate::ports::outbound::{BoxedTask, TaskSpawner};

#[cfg(not(target_arch = "wasm32"))]
pub use native::TokioSpawner;

#[cfg(target_arch = "wasm32")]
pub use browser::LocalSpawner;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::Mutex;

    use tokio::task::JoinHandle;

    use super::*;

    /// Spawns onto the ambient tokio runtime.
    ///
    /// Handles are kept so a short-lived host (the CLI) can wait for every
    /// outstanding notification before exiting.
    #[derive(Debug, Default)]
    pub struct TokioSpawner {
        handles: Mutex<Vec<JoinHandle<()>>>,
    }

    impl TokioSpawner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Wait for all spawned tasks, including ones spawned while waiting.
        pub async fn join_all(&self) {
            loop {
                let pending = match self.handles.lock() {
                    Ok(mut guard) => std::mem::take(&mut *guard),
                    Err(e) => {
                        tracing::error!("Failed to acquire spawner lock: {}", e);
                        return;
                    }
                };
                if pending.is_empty() {
                    return;
                }
                for handle in pending {
                    if let Err(e) = handle.await {
                        tracing::warn!("Notification task aborted: {}", e);
                    }
                }
            }
        }
    }

    impl TaskSpawner for TokioSpawner {
        fn spawn(&self, task: BoxedTask) {
            let handle = tokio::spawn(task);
            match self.handles.lock() {
                Ok(mut guard) => {
                    guard.retain(|h| !h.is_finished());
                    guard.push(handle);
                }
                Err(e) => tracing::error!("Failed to acquire spawner lock: {}", e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;

    /// Runs tasks on the page's event loop.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalSpawner;

    impl TaskSpawner for LocalSpawner {
        fn spawn(&self, task: BoxedTask) {
            wasm_bindgen_futures::spawn_local(task);
        }
    }
}
