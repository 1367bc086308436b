//! Frame-stamped automation dispatch for the audio thread.

use std::sync::Arc;

use crate::clock::RenderClock;
use crate::lockfree::SpscRing;
use crate::node::DspNode;

/// Callback applied to the target node when its trigger frame is reached.
pub type AutomationFn = Box<dyn FnOnce(&mut dyn DspNode) + Send>;

/// A time-stamped automation callback, keyed by a logical node handle.
///
/// The handle is resolved to a node borrow at dispatch time; events whose
/// target has been removed since scheduling are dropped by the dispatcher.
pub struct ScheduledEvent {
    pub frame: u64,
    pub node_id: String,
    pub callback: AutomationFn,
}

/// Bounded lock-free scheduler dispatching events whose frame has arrived.
///
/// Single producer (control thread), single consumer (audio thread).
/// Events must be scheduled in non-decreasing frame order; dispatch stops at
/// the first event still in the future, so an out-of-order insertion would
/// hold back everything behind it.
pub struct RealTimeScheduler<const CAP: usize> {
    clock: Arc<RenderClock>,
    queue: SpscRing<ScheduledEvent>,
}

impl<const CAP: usize> RealTimeScheduler<CAP> {
    pub fn new(clock: Arc<RenderClock>) -> Self {
        Self {
            clock,
            queue: SpscRing::with_capacity(CAP),
        }
    }

    pub fn capacity(&self) -> usize {
        CAP
    }

    /// Enqueues an event. Returns `false` when the queue is full; the event
    /// is dropped in that case.
    pub fn schedule(&self, event: ScheduledEvent) -> bool {
        self.queue.push(event).is_ok()
    }

    /// Pops every event with `frame <= clock.frame_time()` and hands it to
    /// `apply`, in arrival order.
    pub fn dispatch_due_events(&self, mut apply: impl FnMut(ScheduledEvent)) {
        let now = self.clock.frame_time();
        while let Some(event) = self.queue.pop_if(|event| event.frame <= now) {
            apply(event);
        }
    }
}
