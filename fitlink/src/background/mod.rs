pub mod steps_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Tracks running fetch tasks by id so a repeated request replaces the old one
pub struct BackgroundTaskManager {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a task, aborting any still-running task with the same id
    pub fn spawn_load_task<F>(&mut self, task_id: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.tasks.remove(task_id) {
            if !handle.is_finished() {
                tracing::debug!("Replacing running task {}", task_id);
            }
            handle.abort();
        }

        self.tasks.insert(task_id, tokio::spawn(future));
    }

    pub fn is_running(&self, task_id: &str) -> bool {
        self.tasks
            .get(task_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
