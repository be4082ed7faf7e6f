// File: src/core/queue.rs
use std::cmp::Ordering;
use std::fmt;

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// A value tagged with a numeric priority, for queues built with
/// `max_by_priority` / `min_by_priority`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prioritized<T> {
    pub value: T,
    pub priority: f64,
}

/// Binary heap ordered by a caller-supplied three-way comparator.
///
/// The comparator returns `Ordering::Less` when its first argument belongs
/// closer to the top than the second. Push and pop are O(log n), peek is O(1).
pub struct PriorityQueue<T> {
    heap: Vec<T>,
    comparator: Comparator<T>,
}

impl<T> PriorityQueue<T> {
    pub fn with_comparator<F>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self { heap: Vec::new(), comparator: Box::new(comparator) }
    }

    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the top element, `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Pops at most `k` elements, best first.
    pub fn pop_up_to(&mut self, k: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(k.min(self.heap.len()));
        while out.len() < k {
            match self.pop() {
                Some(value) => out.push(value),
                None => break,
            }
        }
        out
    }

    fn before(&self, a: usize, b: usize) -> bool {
        (self.comparator)(&self.heap[a], &self.heap[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.before(index, parent) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut best = index;

            if left < len && self.before(left, best) {
                best = left;
            }
            if right < len && self.before(right, best) {
                best = right;
            }
            if best == index {
                break;
            }
            self.heap.swap(index, best);
            index = best;
        }
    }
}

impl<T: 'static> PriorityQueue<Prioritized<T>> {
    /// Highest priority on top.
    pub fn max_by_priority() -> Self {
        Self::with_comparator(|a: &Prioritized<T>, b: &Prioritized<T>| {
            b.priority.total_cmp(&a.priority)
        })
    }

    /// Lowest priority on top.
    pub fn min_by_priority() -> Self {
        Self::with_comparator(|a: &Prioritized<T>, b: &Prioritized<T>| {
            a.priority.total_cmp(&b.priority)
        })
    }

    pub fn push_with_priority(&mut self, value: T, priority: f64) {
        self.push(Prioritized { value, priority });
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue").field("heap", &self.heap).finish_non_exhaustive()
    }
}
