//! Snapshot-based undo/redo history.

/// Default maximum number of undo states to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo/redo history over full document snapshots.
///
/// `past` is ordered oldest first. The redo stack is stored with the nearest
/// entry at the end so that both undo and redo are stack pops.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: Vec<T>,
    present: T,
    future: Vec<T>,
    /// Maximum length of `past`; 0 means unbounded.
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Create a history with `present` as the only state.
    pub fn new(present: T, limit: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
            limit,
        }
    }

    /// The current state.
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Replace the present with `next`, recording the previous state.
    ///
    /// Any redo branch is discarded.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();

        if self.limit > 0 && self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(..overflow);
        }
    }

    /// Step back one state.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        true
    }

    /// Step forward one state.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    /// Drop all history and start over from `present`.
    pub fn reset(&mut self, present: T) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Past states, oldest first.
    pub fn past(&self) -> &[T] {
        &self.past
    }

    /// Redo states, nearest first.
    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter().rev()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> History<Vec<u32>> {
        History::new(Vec::new(), DEFAULT_HISTORY_LIMIT)
    }

    #[test]
    fn test_commit_and_undo() {
        let mut h = history();
        h.commit(vec![1]);
        h.commit(vec![1, 2]);

        assert_eq!(h.past(), &[vec![], vec![1]]);
        assert!(h.undo());
        assert_eq!(h.present(), &vec![1]);
        assert!(h.can_redo());
        assert!(h.undo());
        assert_eq!(h.present(), &Vec::<u32>::new());
        assert!(!h.can_undo());
    }

    #[test]
    fn test_redo_order_is_nearest_first() {
        let mut h = history();
        h.commit(vec![1]);
        h.commit(vec![1, 2]);
        h.undo();
        h.undo();

        let future: Vec<_> = h.future().cloned().collect();
        assert_eq!(future, vec![vec![1], vec![1, 2]]);

        assert!(h.redo());
        assert_eq!(h.present(), &vec![1]);
        assert!(h.redo());
        assert_eq!(h.present(), &vec![1, 2]);
        assert!(!h.redo());
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut h = history();
        h.commit(vec![1]);
        h.undo();
        assert_eq!(h.future_len(), 1);

        h.commit(vec![7]);
        assert_eq!(h.future_len(), 0);
        assert!(!h.redo());
        assert_eq!(h.present(), &vec![7]);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut h = history();
        h.commit(vec![3]);
        h.undo();
        h.redo();
        let before = h.present().clone();

        assert!(!h.redo());
        assert_eq!(h.present(), &before);

        let mut fresh = History::new(vec![9], 0);
        assert!(!fresh.undo());
        assert_eq!(fresh.present(), &vec![9]);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut h = History::new(0u32, 3);
        for n in 1..=5 {
            h.commit(n);
        }
        assert_eq!(h.past(), &[2, 3, 4]);
        assert_eq!(h.limit(), 3);
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let mut h = History::new(0u32, 0);
        for n in 1..=200 {
            h.commit(n);
        }
        assert_eq!(h.past().len(), 200);
    }

    #[test]
    fn test_reset() {
        let mut h = history();
        h.commit(vec![1]);
        h.commit(vec![2]);
        h.undo();
        h.reset(vec![5, 5]);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.present(), &vec![5, 5]);
    }
}
