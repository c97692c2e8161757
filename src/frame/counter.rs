use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::FrameCount;
use crate::frame::scheduler::AnimationScheduler;

/// Monotonic count of host animation callbacks.
///
/// Clones share the same count. A started counter increments exactly once per scheduler frame
/// and immediately requests the next one, so the chain never ends while the scheduler runs.
#[derive(Clone, Debug, Default)]
pub struct FrameCounter {
    frames: Rc<Cell<u64>>,
}

impl FrameCounter {
    /// A counter at zero that nothing ticks yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter at zero, ticked by every frame of `scheduler` from now on.
    pub fn start<S: AnimationScheduler + 'static>(scheduler: Rc<S>) -> Self {
        let counter = Self::new();
        counter.arm(scheduler);
        counter
    }

    fn arm(&self, scheduler: Rc<dyn AnimationScheduler>) {
        let frames = self.frames.clone();
        let next = scheduler.clone();
        scheduler.request_animation_frame(Box::new(move |_| {
            let counter = FrameCounter { frames };
            counter.tick();
            counter.arm(next);
        }));
    }

    /// Current count.
    pub fn current(&self) -> FrameCount {
        FrameCount(self.frames.get())
    }

    /// Count one frame. Used by the scheduler chain, or directly by hosts that present frames
    /// themselves.
    pub fn tick(&self) {
        self.frames.set(FrameCount(self.frames.get()).next().0);
    }

    /// Move the count forward to `target`. Never moves it back.
    pub fn advance_to(&self, target: FrameCount) {
        if target.0 > self.frames.get() {
            self.frames.set(target.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/counter.rs"]
mod tests;
