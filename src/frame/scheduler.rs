use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callback handed to the host scheduler. Receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host "run once more very soon" primitive (`requestAnimationFrame`).
pub trait AnimationScheduler {
    /// Schedule `callback` for the next frame and return a request id.
    fn request_animation_frame(&self, callback: FrameCallback) -> u32;
}

impl<S: AnimationScheduler + ?Sized> AnimationScheduler for Rc<S> {
    fn request_animation_frame(&self, callback: FrameCallback) -> u32 {
        (**self).request_animation_frame(callback)
    }
}

/// Transparent wrapper that forwards every request and counts them.
#[derive(Debug)]
pub struct ObservedScheduler<S> {
    inner: S,
    requests: Cell<u64>,
}

impl<S: AnimationScheduler> ObservedScheduler<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            requests: Cell::new(0),
        }
    }

    /// Requests forwarded so far.
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }

    /// The wrapped scheduler.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: AnimationScheduler> AnimationScheduler for ObservedScheduler<S> {
    fn request_animation_frame(&self, callback: FrameCallback) -> u32 {
        self.requests.set(self.requests.get() + 1);
        self.inner.request_animation_frame(callback)
    }
}

/// Headless scheduler that runs queued callbacks one frame at a time.
///
/// Callbacks requested while a frame is running land in the next frame.
pub struct ManualScheduler {
    queue: RefCell<Vec<(u32, FrameCallback)>>,
    next_id: Cell<u32>,
    now_ms: Cell<f64>,
    frame_interval_ms: f64,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// A 60 Hz scheduler starting at time zero.
    pub fn new() -> Self {
        Self::with_interval_ms(1000.0 / 60.0)
    }

    /// A scheduler whose clock advances by `frame_interval_ms` per frame.
    pub fn with_interval_ms(frame_interval_ms: f64) -> Self {
        Self {
            queue: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            now_ms: Cell::new(0.0),
            frame_interval_ms,
        }
    }

    /// Callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Current clock value in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }

    /// Advance the clock by one frame and run every callback queued before this call.
    /// Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let now = self.now_ms.get() + self.frame_interval_ms;
        self.now_ms.set(now);
        let count = due.len();
        for (_, callback) in due {
            callback(now);
        }
        count
    }

    /// Drop a pending request. Returns whether it was still queued.
    pub fn cancel_animation_frame(&self, id: u32) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|(queued, _)| *queued != id);
        queue.len() != before
    }
}

impl AnimationScheduler for ManualScheduler {
    fn request_animation_frame(&self, callback: FrameCallback) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.queue.borrow_mut().push((id, callback));
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/scheduler.rs"]
mod tests;
