use std::collections::VecDeque;

/// A ring buffer that drops its oldest item when full.
pub struct Queue<T> {
    max: usize,
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::with_capacity(500)
    }
}

impl<T> Queue<T> {
    pub fn with_capacity(max: usize) -> Self {
        assert!(max != 0, "a queue must hold at least one item");
        Self {
            items: VecDeque::with_capacity(max),
            max,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.max {
            self.items.pop_front();
        }
        self.items.push_back(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + ExactSizeIterator + DoubleEndedIterator {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;

    #[test]
    fn oldest_falls_out() {
        let mut queue = Queue::with_capacity(3);
        for i in 0..5 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);

        queue.clear();
        assert!(queue.is_empty());
    }
}
