use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A body run over and over on its own thread until the owning handle
/// cancels it. Cycles never overlap: the next one starts only after the
/// previous body returned and `interval` elapsed.
///
/// Cancelling does not wait for a cycle that is already running.
pub struct RepeatingTask {
    cancelled: Arc<AtomicBool>,
}

impl RepeatingTask {
    pub fn spawn<F>(interval: Duration, mut body: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        std::thread::spawn(move || {
            while !flag.load(Ordering::SeqCst) {
                body();
                std::thread::sleep(interval);
            }
        });

        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_runs_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        let task = RepeatingTask::spawn(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        std::thread::sleep(Duration::from_millis(50));
        task.cancel();
        assert!(task.is_cancelled());

        std::thread::sleep(Duration::from_millis(20));
        let after_cancel = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(50));

        assert!(after_cancel > 0);
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn test_drop_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        {
            let _task = RepeatingTask::spawn(Duration::from_millis(1), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            std::thread::sleep(Duration::from_millis(20));
        }

        std::thread::sleep(Duration::from_millis(20));
        let after_drop = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(50));

        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
