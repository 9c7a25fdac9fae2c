use std::collections::{LinkedList, VecDeque};

/// A queue that supports both popping and pushing at front and back.
/// Breadth-first traversals use it as FIFO, depth-first traversals as LIFO.
pub trait BidirectedQueue<T>: Default {
    /// Inserts an element at the front.
    fn push_front(&mut self, t: T);
    /// Inserts an element at the back.
    fn push_back(&mut self, t: T);
    /// Removes the front element.
    fn pop_front(&mut self) -> Option<T>;
    /// Removes the back element.
    fn pop_back(&mut self) -> Option<T>;
    /// Removes all elements.
    fn clear(&mut self);
    /// Returns the amount of elements.
    fn len(&self) -> usize;
    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_bidirected_queue {
    ($Queue:ident) => {
        impl<T> BidirectedQueue<T> for $Queue<T> {
            fn push_front(&mut self, t: T) {
                $Queue::push_front(self, t)
            }

            fn push_back(&mut self, t: T) {
                $Queue::push_back(self, t)
            }

            fn pop_front(&mut self) -> Option<T> {
                $Queue::pop_front(self)
            }

            fn pop_back(&mut self) -> Option<T> {
                $Queue::pop_back(self)
            }

            fn clear(&mut self) {
                $Queue::clear(self)
            }

            fn len(&self) -> usize {
                $Queue::len(self)
            }
        }
    };
}

impl_bidirected_queue!(VecDeque);
impl_bidirected_queue!(LinkedList);

#[cfg(test)]
mod tests {
    use crate::algo::queue::BidirectedQueue;
    use std::collections::{LinkedList, VecDeque};

    fn drain_from_both_ends<Queue: BidirectedQueue<u8>>() -> Vec<u8> {
        let mut queue = Queue::default();
        queue.push_back(2);
        queue.push_back(3);
        queue.push_front(1);
        assert_eq!(BidirectedQueue::len(&queue), 3);
        let result = vec![
            BidirectedQueue::pop_back(&mut queue).unwrap(),
            BidirectedQueue::pop_front(&mut queue).unwrap(),
            BidirectedQueue::pop_front(&mut queue).unwrap(),
        ];
        assert!(BidirectedQueue::is_empty(&queue));
        result
    }

    #[test]
    fn test_queue_implementations_agree() {
        assert_eq!(drain_from_both_ends::<VecDeque<_>>(), vec![3, 1, 2]);
        assert_eq!(drain_from_both_ends::<LinkedList<_>>(), vec![3, 1, 2]);
    }
}
