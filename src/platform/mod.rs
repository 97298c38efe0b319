//! Platform abstraction layer
//!
//! Handles the host side of a running session:
//! - Sharing one session between the input thread and the tick thread
//! - Driving ticks at a fixed rate
//! - Handing each frame's snapshot to a renderer

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::sim::{Session, Snapshot, TickOutcome};

/// Rendering collaborator: receives every frame after its tick
pub trait SnapshotSink {
    fn present(&mut self, snapshot: &Snapshot, outcome: TickOutcome);
}

/// Session behind a single lock; every call holds it for its whole duration
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // Every session method leaves a valid state before it can panic
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self) {
        self.lock().start();
    }

    pub fn request_jump(&self) {
        self.lock().request_jump();
    }

    pub fn press(&self) {
        self.lock().press();
    }

    /// Tick once and capture the resulting frame under the same lock
    pub fn tick(&self) -> (TickOutcome, Snapshot) {
        let mut session = self.lock();
        let outcome = session.tick();
        (outcome, session.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }
}

/// Background thread ticking a shared session at a fixed rate.
///
/// Stops when dropped.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<S>(session: SharedSession, interval: Duration, mut sink: S) -> Self
    where
        S: SnapshotSink + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut deadline = Instant::now() + interval;
            while !stop_flag.load(Ordering::Relaxed) {
                let (outcome, snapshot) = session.tick();
                sink.present(&snapshot, outcome);

                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                    deadline += interval;
                } else {
                    // Fell behind (slow sink); drop the missed ticks
                    log::debug!("Ticker overran by {:?}", now - deadline);
                    deadline = now + interval;
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
