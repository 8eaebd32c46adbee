// Fixed-capacity LIFO and FIFO containers. Capacity is set at construction;
// pushing past it is an `Overflow` error and leaves the container unchanged.

use crate::error::{Result, RudimentsError};
use std::collections::VecDeque;
use std::fmt;

/// A stack holding at most `max_depth` items.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Storage grows on demand; only the bound is fixed here.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(RudimentsError::overflow(format!(
                "stack is full at depth {}",
                self.capacity
            )));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn max_depth(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Top of the stack first.
impl<T: fmt::Display> fmt::Display for BoundedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

/// A queue holding at most `max_len` items.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    pub fn enqueue(&mut self, item: T) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(RudimentsError::overflow(format!(
                "queue is full at length {}",
                self.capacity
            )));
        }
        self.items.push_back(item);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn max_len(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Front of the queue first.
impl<T: fmt::Display> fmt::Display for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_lifo_and_bounded() {
        let mut stack = BoundedStack::with_capacity(2);
        assert!(stack.is_empty());
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert!(matches!(stack.push(3), Err(RudimentsError::Overflow { .. })));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.max_depth(), 2);
        assert_eq!(stack.to_string(), "[2, 1]");
        assert_eq!(stack.peek(), Some(&2));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn queue_is_fifo_and_bounded() {
        let mut queue = BoundedQueue::with_capacity(3);
        for c in ['a', 'b', 'c'] {
            queue.enqueue(c).unwrap();
        }
        assert!(queue.enqueue('d').is_err());
        assert_eq!((queue.front(), queue.back()), (Some(&'a'), Some(&'c')));
        assert_eq!(queue.to_string(), "[a, b, c]");
        assert_eq!(queue.dequeue(), Some('a'));
        queue.enqueue('d').unwrap();
        assert_eq!(queue.len(), 3);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.max_len(), 3);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut stack: BoundedStack<u8> = BoundedStack::with_capacity(0);
        assert!(stack.push(1).is_err());
        let mut queue: BoundedQueue<u8> = BoundedQueue::with_capacity(0);
        assert!(queue.enqueue(1).is_err());
    }

    #[test]
    fn unbounded_capacity_allocates_lazily() {
        let mut stack = BoundedStack::with_capacity(usize::MAX);
        stack.push("a").unwrap();
        assert_eq!(stack.max_depth(), usize::MAX);
        assert_eq!(stack.pop(), Some("a"));
        let mut queue = BoundedQueue::with_capacity(usize::MAX);
        queue.enqueue(1u64).unwrap();
        assert_eq!(queue.max_len(), usize::MAX);
        assert_eq!(queue.dequeue(), Some(1));
    }
}
