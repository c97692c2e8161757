//! Frame counting on top of the host's animation scheduler.
//!
//! The recorder never drives rendering itself. It only needs to know whether at least one frame
//! was presented between two context calls, which it reads off a [`counter::FrameCounter`] that
//! re-arms itself on every host animation callback.

/// Self-re-arming frame counter.
pub mod counter;
/// Scheduler boundary and a headless scheduler.
pub mod scheduler;
