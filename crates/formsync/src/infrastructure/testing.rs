//! Test doubles

use std::sync::Mutex;

use crate::ports::outbound::{BoxedTask, TaskSpawner};

/// Holds spawned tasks until the test decides when, and in which order,
/// they complete.
#[derive(Default)]
pub struct QueuedSpawner {
    queue: Mutex<Vec<BoxedTask>>,
}

impl QueuedSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn take_all(&self) -> Vec<BoxedTask> {
        self.queue
            .lock()
            .map(|mut q| std::mem::take(&mut *q))
            .unwrap_or_default()
    }

    /// Run queued tasks in dispatch order.
    pub async fn run_all(&self) {
        for task in self.take_all() {
            task.await;
        }
    }
}

impl TaskSpawner for QueuedSpawner {
    fn spawn(&self, task: BoxedTask) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(task);
        }
    }
}
