use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Duration, sleep},
};

/// Message delivered after a delay unless the task is dropped first.
///
/// Dropping aborts the timer, so an owner that goes away never receives a
/// late message.
#[derive(Debug)]
pub struct DeferredTask {
    handle: JoinHandle<()>,
}

impl DeferredTask {
    /// Sends `msg` on `tx` once `delay` has passed.
    pub fn spawn<T: Send + 'static>(delay: Duration, tx: mpsc::UnboundedSender<T>, msg: T) -> Self {
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(msg);
        });
        Self { handle }
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
