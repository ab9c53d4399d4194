//! Background tasks tied to a screen's lifetime.

use tokio::task::JoinHandle;

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub struct TaskGuard(JoinHandle<()>);

impl TaskGuard {
    #[must_use]
    pub const fn new(handle: JoinHandle<()>) -> Self {
        Self(handle)
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// An in-flight login submit. Dropping it cancels the submit.
#[derive(Debug)]
pub struct PendingSubmit {
    id: u64,
    _task: TaskGuard,
}

impl PendingSubmit {
    #[must_use]
    pub const fn new(id: u64, handle: JoinHandle<()>) -> Self {
        Self {
            id,
            _task: TaskGuard::new(handle),
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(800)).await;
            let _ = tx.send(());
        });

        let pending = PendingSubmit::new(3, handle);
        assert_eq!(pending.id(), 3);
        drop(pending);

        assert!(rx.await.is_err(), "sender dropped without sending");
    }
}
