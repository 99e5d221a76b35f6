//! Snapshot-based undo/redo.
//!
//! The history tracks a *baseline*, the snapshot it considers current.
//! Every registered change pushes the previous baseline onto the undo
//! stack. Undo and redo hand back a snapshot for the caller to apply and
//! arm a one-shot skip so that the caller's follow-up `register` of the
//! applied state does not become a new undo step.

/// Default number of undo states to keep.
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded linear undo/redo over owned snapshots.
#[derive(Debug, Clone)]
pub struct History<S: Clone> {
    undo_stack: Vec<S>,
    redo_stack: Vec<S>,
    baseline: Option<S>,
    skip_next: bool,
    capacity: usize,
}

impl<S: Clone> Default for History<S> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<S: Clone> History<S> {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            baseline: None,
            skip_next: false,
            capacity: capacity.max(1),
        }
    }

    /// Record that the state changed to `snapshot`.
    pub fn register(&mut self, snapshot: S) {
        if self.skip_next {
            self.skip_next = false;
            log::debug!("history: register swallowed after restore");
            return;
        }
        let Some(previous) = self.baseline.replace(snapshot) else {
            log::debug!("history: baseline established");
            return;
        };
        self.undo_stack.push(previous);
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Step back. Returns the snapshot to apply, or `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<S> {
        let snapshot = self.undo_stack.pop()?;
        if let Some(current) = self.baseline.replace(snapshot.clone()) {
            self.redo_stack.push(current);
        }
        self.skip_next = true;
        Some(snapshot)
    }

    /// Step forward again. Returns the snapshot to apply, or `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<S> {
        let snapshot = self.redo_stack.pop()?;
        if let Some(current) = self.baseline.replace(snapshot.clone()) {
            self.undo_stack.push(current);
            if self.undo_stack.len() > self.capacity {
                self.undo_stack.remove(0);
            }
        }
        self.skip_next = true;
        Some(snapshot)
    }

    /// Forget all history and start over from `snapshot`.
    pub fn reset(&mut self, snapshot: S) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.baseline = Some(snapshot);
        self.skip_next = true;
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn baseline(&self) -> Option<&S> {
        self.baseline.as_ref()
    }

    /// Whether the next `register` will be swallowed.
    pub fn is_skip_armed(&self) -> bool {
        self.skip_next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_register_after_reset_is_swallowed() {
        let mut h = History::new(10);
        h.reset(0);
        h.register(0);
        assert!(!h.can_undo());
        h.register(1);
        assert!(h.can_undo());
        assert_eq!(h.baseline(), Some(&1));
    }

    #[test]
    fn test_first_register_without_reset_sets_baseline() {
        let mut h = History::new(10);
        h.register("a");
        assert!(!h.can_undo());
        h.register("b");
        assert_eq!(h.undo(), Some("a"));
    }

    #[test]
    fn test_round_trip() {
        let mut h = History::new(50);
        h.reset(0);
        h.register(0);
        for i in 1..=5 {
            h.register(i);
        }

        for expected in (0..5).rev() {
            let s = h.undo().unwrap();
            assert_eq!(s, expected);
            h.register(s);
        }
        assert!(h.undo().is_none());

        let mut last = 0;
        for expected in 1..=5 {
            let s = h.redo().unwrap();
            assert_eq!(s, expected);
            h.register(s);
            last = s;
        }
        assert_eq!(last, 5);
        assert!(h.redo().is_none());
    }

    #[test]
    fn test_capacity_bound() {
        let mut h = History::new(3);
        h.reset(0);
        h.register(0);
        for i in 1..=5 {
            h.register(i);
            assert!(h.undo_len() <= 3);
        }

        let mut recovered = Vec::new();
        while let Some(s) = h.undo() {
            recovered.push(s);
            h.register(s);
        }
        assert_eq!(recovered, vec![4, 3, 2]);
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut h = History::new(10);
        h.reset(0);
        h.register(0);
        h.register(1);
        h.register(2);
        let s = h.undo().unwrap();
        h.register(s);
        assert!(h.can_redo());

        h.register(7);
        assert!(!h.can_redo());
        assert_eq!(h.undo(), Some(1));
    }

    #[test]
    fn test_empty_undo_redo_are_noops() {
        let mut h: History<u8> = History::default();
        assert_eq!(h.capacity(), DEFAULT_CAPACITY);
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert!(!h.is_skip_armed());
    }

    #[test]
    fn test_snapshots_are_owned() {
        let mut h = History::new(10);
        let mut live = vec![1];
        h.reset(live.clone());
        h.register(live.clone());
        live.push(2);
        h.register(live.clone());
        live.push(3);
        assert_eq!(h.undo(), Some(vec![1]));
    }
}
