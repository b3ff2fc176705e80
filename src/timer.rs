use std::time::Duration;

use crate::RequestPaint;

/// A single-shot timer that hands back `T` once `delay` has passed.
///
/// The value is parked on a helper thread and comes back through a channel,
/// so the ui only has to poll. It cannot be cancelled; dropping it just
/// discards the value when it arrives.
pub struct Deferred<T> {
    ready: flume::Receiver<T>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl<T> Deferred<T>
where
    T: Send + 'static,
{
    pub fn spawn<R>(delay: Duration, value: T, repaint: R) -> Self
    where
        R: RequestPaint + 'static,
    {
        let (tx, ready) = flume::bounded(1);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(delay);
            if tx.send(value).is_ok() {
                repaint.request_repaint();
            }
        });

        Self {
            ready,
            handle: Some(handle),
        }
    }

    /// Takes the value if the timer has fired.
    pub fn try_fire(&mut self) -> Option<T> {
        let value = self.ready.try_recv().ok()?;
        self.reap();
        Some(value)
    }

    /// Blocks for at most `timeout` waiting on the timer.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<T> {
        let value = self.ready.recv_timeout(timeout).ok()?;
        self.reap();
        Some(value)
    }

    fn reap(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::{Duration, Instant},
    };

    use super::Deferred;
    use crate::{NoopRepaint, RequestPaint};

    #[test]
    fn fires_after_the_delay() {
        let start = Instant::now();
        let mut timer = Deferred::spawn(Duration::from_millis(50), "Sara", NoopRepaint);
        assert_eq!(timer.try_fire(), None);

        assert_eq!(timer.wait_timeout(Duration::from_secs(5)), Some("Sara"));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn fires_once() {
        let mut timer = Deferred::spawn(Duration::ZERO, 42, NoopRepaint);
        assert_eq!(timer.wait_timeout(Duration::from_secs(5)), Some(42));
        assert_eq!(timer.try_fire(), None);
        assert_eq!(timer.wait_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn asks_for_a_repaint() {
        #[derive(Clone, Default)]
        struct Counter(Arc<AtomicUsize>);
        impl RequestPaint for Counter {
            fn request_repaint(&self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let counter = Counter::default();
        let mut timer = Deferred::spawn(Duration::ZERO, (), counter.clone());
        assert_eq!(timer.wait_timeout(Duration::from_secs(5)), Some(()));
        // the sender is joined once the value is taken
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}
