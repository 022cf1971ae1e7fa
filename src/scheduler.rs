/// Frame-synchronized, self-rescheduling loop.
///
/// One callback invocation per frame interval, each running to completion
/// before the next is scheduled.  A `CancelHandle` stops the loop; once it
/// is cancelled no further callback runs, even if the cancel was raised from
/// inside the callback itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct FrameLoop {
    interval: Duration,
    cancel: CancelHandle,
}

impl FrameLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            cancel: CancelHandle::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Run until cancelled or the callback fails.  The callback gets the
    /// 1-based frame number.  Returns the number of frames executed.
    pub fn run<E>(&self, mut on_frame: impl FnMut(u64) -> Result<(), E>) -> Result<u64, E> {
        let mut frame: u64 = 0;
        loop {
            if self.cancel.is_cancelled() {
                log::debug!("frame loop cancelled after {frame} frames");
                return Ok(frame);
            }
            let frame_start = Instant::now();
            frame += 1;
            on_frame(frame)?;

            // Sleep only the remainder of the frame budget
            let elapsed = frame_start.elapsed();
            if elapsed < self.interval && !self.cancel.is_cancelled() {
                thread::sleep(self.interval - elapsed);
            }
        }
    }
}
