use log::debug;
use tokio::task::JoinHandle;

/// Owned handle to a running clock ticker.
///
/// Ticking continues until [`TickerHandle::stop`] is called or the handle is
/// dropped.
#[derive(Debug)]
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    pub(super) fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Cancel the periodic refresh. No refresh runs after this returns
    /// control to the runtime.
    pub fn stop(mut self) {
        self.abort();
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Clock ticker stopped");
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
