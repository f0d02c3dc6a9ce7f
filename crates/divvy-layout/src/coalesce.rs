// ABOUTME: Latest-wins slot for work deferred to the next rendered frame.
// ABOUTME: Bursts of pointer moves collapse into one value per frame.

/// Holds at most one pending value; newer pushes replace older ones.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Queue a value for the next frame, returning the one it replaced
    pub fn push(&mut self, value: T) -> Option<T> {
        self.pending.replace(value)
    }

    /// Flush the pending value
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending value without running it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_value_wins() {
        let mut slot = FrameCoalescer::new();
        assert_eq!(slot.push(1), None);
        assert_eq!(slot.push(2), Some(1));
        assert_eq!(slot.push(3), Some(2));
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn cancel_drops_pending() {
        let mut slot = FrameCoalescer::new();
        slot.push("move");
        assert!(slot.has_pending());
        slot.cancel();
        assert!(!slot.has_pending());
        assert_eq!(slot.take(), None);
    }
}
