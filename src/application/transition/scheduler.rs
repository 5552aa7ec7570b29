use super::display_cell::{DisplayWriter, DisplayedFrame};
use crate::ports::outbound::{RenderSurface, VisualClass};
use crate::shared::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Delay between applying the fade-out class and swapping the frame
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    FadingIn,
}

#[derive(Debug)]
struct SchedulerState {
    phase: TransitionPhase,
    /// At most one frame waits; a newer submit replaces it
    pending: Option<Arc<DisplayedFrame>>,
    closed: bool,
    completed: u64,
    superseded: u64,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<SchedulerState>,
    wake: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable handle used to feed frames to a running scheduler
#[derive(Debug, Clone)]
pub struct TransitionHandle {
    shared: Arc<Shared>,
}

impl TransitionHandle {
    /// Queues a frame for display.
    ///
    /// While a transition is running the frame takes the single pending slot,
    /// replacing any frame already waiting there.
    ///
    /// # Errors
    /// Returns an error once the scheduler has been shut down
    pub fn submit(&self, frame: Arc<DisplayedFrame>) -> Result<()> {
        {
            let mut state = self.shared.lock();
            if state.closed {
                anyhow::bail!("Transition scheduler has been torn down");
            }
            if state.pending.replace(frame).is_some() {
                state.superseded += 1;
                tracing::debug!("pending frame superseded by a newer one");
            }
        }
        self.shared.wake.notify_one();
        Ok(())
    }

    pub fn phase(&self) -> TransitionPhase {
        self.shared.lock().phase
    }

    pub fn has_pending(&self) -> bool {
        self.shared.lock().pending.is_some()
    }

    /// Number of swaps performed so far
    pub fn completed_transitions(&self) -> u64 {
        self.shared.lock().completed
    }

    /// Number of pending frames replaced before being displayed
    pub fn superseded_frames(&self) -> u64 {
        self.shared.lock().superseded
    }

    /// Stops the scheduler. A transition already in its delay completes;
    /// any pending frame is dropped and the display cell is cleared.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.lock();
            state.closed = true;
            state.pending = None;
        }
        self.shared.wake.notify_one();
    }
}

/// TransitionScheduler - sequences visible swaps of the displayed frame
///
/// State machine: `Idle -> FadingOut -> (swap) FadingIn -> Idle`. The
/// scheduler owns the display cell's writer, so the swap step is the only
/// place the displayed frame ever changes.
pub struct TransitionScheduler<S> {
    shared: Arc<Shared>,
    surface: S,
    writer: DisplayWriter,
    delay: Duration,
}

impl<S: RenderSurface + 'static> TransitionScheduler<S> {
    pub fn new(surface: S, writer: DisplayWriter, delay: Duration) -> (Self, TransitionHandle) {
        let shared = Arc::new(Shared {
            state: Mutex::new(SchedulerState {
                phase: TransitionPhase::Idle,
                pending: None,
                closed: false,
                completed: 0,
                superseded: 0,
            }),
            wake: Notify::new(),
        });
        let handle = TransitionHandle {
            shared: Arc::clone(&shared),
        };
        let scheduler = Self {
            shared,
            surface,
            writer,
            delay,
        };
        (scheduler, handle)
    }

    /// Creates a scheduler and runs it on a tokio task
    pub fn spawn(
        surface: S,
        writer: DisplayWriter,
        delay: Duration,
    ) -> (TransitionHandle, JoinHandle<()>) {
        let (scheduler, handle) = Self::new(surface, writer, delay);
        let task = tokio::spawn(scheduler.run());
        (handle, task)
    }

    /// Runs transitions until the handle is shut down
    pub async fn run(self) {
        while let Some(frame) = self.next_frame().await {
            self.surface.apply_class(VisualClass::FadeOut);
            tokio::time::sleep(self.delay).await;

            let version = frame.snapshot.version().to_string();
            self.writer.replace(frame);
            self.set_phase(TransitionPhase::FadingIn);
            self.surface.apply_class(VisualClass::FadeIn);

            {
                let mut state = self.shared.lock();
                state.phase = TransitionPhase::Idle;
                state.completed += 1;
            }
            tracing::debug!(version = %version, "frame swapped");
        }

        self.writer.destroy();
        tracing::debug!("transition scheduler stopped");
    }

    /// Waits for a pending frame and enters `FadingOut` atomically with
    /// taking it. Returns `None` after shutdown.
    async fn next_frame(&self) -> Option<Arc<DisplayedFrame>> {
        loop {
            {
                let mut state = self.shared.lock();
                if state.closed {
                    state.phase = TransitionPhase::Idle;
                    return None;
                }
                if let Some(frame) = state.pending.take() {
                    state.phase = TransitionPhase::FadingOut;
                    return Some(frame);
                }
            }
            self.shared.wake.notified().await;
        }
    }

    fn set_phase(&self, phase: TransitionPhase) {
        self.shared.lock().phase = phase;
    }
}
