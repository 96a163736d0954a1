//! Single-slot frame scheduling.
//!
//! The host calls [`FrameScheduler::take_due`] once per display refresh. At
//! most one frame is outstanding at a time.

/// Identifies a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame. Returns the already pending handle if there is one.
    pub fn request_frame(&mut self) -> FrameHandle {
        if let Some(handle) = self.pending {
            return handle;
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Cancel `handle` if it is still pending. Returns whether anything was cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel whatever frame is pending.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Hand the pending frame to the caller for running.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_outstanding_frame() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.request_frame();
        let again = scheduler.request_frame();
        assert_eq!(first, again);
        assert!(scheduler.is_pending());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.request_frame();
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(!scheduler.cancel_pending());
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_stale_handle_does_not_cancel_new_frame() {
        let mut scheduler = FrameScheduler::new();
        let old = scheduler.request_frame();
        assert_eq!(scheduler.take_due(), Some(old));

        let new = scheduler.request_frame();
        assert_ne!(old, new);
        assert!(!scheduler.cancel(old));
        assert_eq!(scheduler.pending(), Some(new));
    }

    #[test]
    fn test_take_due_empties_slot() {
        let mut scheduler = FrameScheduler::new();
        assert_eq!(scheduler.take_due(), None);
        let handle = scheduler.request_frame();
        assert_eq!(scheduler.take_due(), Some(handle));
        assert_eq!(scheduler.take_due(), None);
        assert!(handle.id() > 0);
    }
}
