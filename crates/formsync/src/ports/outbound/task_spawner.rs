//! Task spawning port
//!
//! Notifications are fire-and-forget: the bridge hands the request future to
//! the host's executor and returns immediately. Tasks are never cancelled and
//! complete in whatever order the network delivers.

#[cfg(not(target_arch = "wasm32"))]
pub type BoxedTask = futures_util::future::BoxFuture<'static, ()>;

#[cfg(target_arch = "wasm32")]
pub type BoxedTask = futures_util::future::LocalBoxFuture<'static, ()>;

pub trait TaskSpawner: Send + Sync {
    fn spawn(&self, task: BoxedTask);
}
