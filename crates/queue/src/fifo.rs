use crate::QueueError;

/// A 1-indexed FIFO queue that never shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    data: Vec<T>,
    front: u64,
}

impl<T: Default + Clone> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Clone> Queue<T> {
    /// Returns an empty queue holding only the sentinel.
    pub fn new() -> Self {
        Self { data: vec![T::default()], front: 1 }
    }

    /// Appends a value and returns its index.
    pub fn enqueue(&mut self, value: T) -> u64 {
        let index = self.next_index();
        self.data.push(value);
        index
    }

    /// Removes and returns the value at the front of the queue.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        let value = self.peek()?.clone();
        self.front += 1;
        Ok(value)
    }

    /// Returns the value at the front of the queue without removing it.
    pub fn peek(&self) -> Result<&T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::QueueIsEmpty);
        }
        Ok(&self.data[self.front as usize])
    }

    /// Dequeues every member up to and including `up_to`. Returns nothing if `up_to` was already
    /// dequeued.
    pub fn dequeue_up_to(&mut self, up_to: u64) -> Result<Vec<T>, QueueError> {
        let next_index = self.next_index();
        if up_to >= next_index {
            return Err(QueueError::IndexOutOfRange { index: up_to, next_index });
        }
        if up_to < self.front {
            return Ok(Vec::new());
        }

        let values = self.data[self.front as usize..=up_to as usize].to_vec();
        self.front = up_to + 1;
        Ok(values)
    }

    /// Returns the value stored at the index, including dequeued values.
    pub fn get(&self, index: u64) -> Option<&T> {
        if index == 0 {
            return None;
        }
        self.data.get(index as usize)
    }

    /// Returns the number of members.
    pub fn size(&self) -> u64 {
        self.next_index() - self.front
    }

    /// Returns true if the queue has no members.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the index of the front member.
    pub const fn front(&self) -> u64 {
        self.front
    }

    /// Returns the index the next enqueued value will get.
    pub fn next_index(&self) -> u64 {
        self.data.len() as u64
    }
}
