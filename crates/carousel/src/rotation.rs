//! Auto-advance timing. Exactly one rotation task exists at a time:
//! every restart aborts the previous task before spawning the next, and
//! ticks carry a generation number so one already queued when a restart
//! happens is discarded instead of delivered — manual navigation never
//! races a tick scheduled under the old period.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

pub trait RotationTimer {
    /// Cancels any pending tick and schedules the next full period from
    /// now.
    fn restart(&mut self);
    fn cancel(&mut self);
}

/// Timer that never fires, for surfaces without auto-advance.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualRotation;

impl RotationTimer for ManualRotation {
    fn restart(&mut self) {}
    fn cancel(&mut self) {}
}

/// Consumer end of a [`TokioRotation`]. Ticks stamped with a generation
/// older than the timer's current one were queued before a restart or
/// cancel and are dropped here, never surfaced.
pub struct RotationTicks {
    rx: mpsc::UnboundedReceiver<u64>,
    generation: Arc<AtomicU64>,
}

impl RotationTicks {
    /// Waits for the next still-current tick. Returns `None` once the
    /// timer has been dropped.
    pub async fn recv(&mut self) -> Option<()> {
        while let Some(tick_generation) = self.rx.recv().await {
            if tick_generation == self.generation.load(Ordering::Acquire) {
                return Some(());
            }
        }
        None
    }

    /// Non-blocking variant of [`Self::recv`], skipping stale ticks the
    /// same way.
    pub fn try_recv(&mut self) -> Option<()> {
        while let Ok(tick_generation) = self.rx.try_recv() {
            if tick_generation == self.generation.load(Ordering::Acquire) {
                return Some(());
            }
        }
        None
    }
}

/// Tokio-backed repeating timer. Ticks arrive on the [`RotationTicks`]
/// returned by [`TokioRotation::new`]; the owner forwards each one to
/// `Carousel::auto_advance_tick` on its own event loop, which keeps the
/// controller single-mutator even though the timer runs as a task.
pub struct TokioRotation {
    period: Duration,
    ticks: mpsc::UnboundedSender<u64>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl TokioRotation {
    pub fn new(period: Duration) -> (Self, RotationTicks) {
        let (ticks, rx) = mpsc::unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));
        (
            Self {
                period,
                ticks,
                generation: generation.clone(),
                task: None,
            },
            RotationTicks { rx, generation },
        )
    }
}

impl RotationTimer for TokioRotation {
    fn restart(&mut self) {
        self.cancel();
        let period = self.period;
        let ticks = self.ticks.clone();
        let generation = self.generation.load(Ordering::Acquire);
        self.task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if ticks.send(generation).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        // Invalidates ticks already in flight as well as future ones
        // from the aborted task.
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioRotation {
    fn drop(&mut self) {
        self.cancel();
    }
}
